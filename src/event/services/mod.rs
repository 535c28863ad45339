//! Application services for event access.

mod access;

pub use access::{CreateEventRequest, EventAccessError, EventAccessResult, EventAccessService};
