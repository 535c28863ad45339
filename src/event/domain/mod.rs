//! Domain model for events and role resolution.

mod access;
mod error;
mod event;
mod ids;

pub use access::{Actor, ActorRole};
pub use error::EventDomainError;
pub use event::{Event, EventDetails, PersistedEventData};
pub use ids::{EventId, EventTitle};
