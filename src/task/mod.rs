//! Task lifecycle management for Convene.
//!
//! Tasks belong to exactly one event. Organizers create, edit and delete
//! them; anyone with access to the event may claim an unclaimed task; only
//! the assignee may submit a solution; organizers and assignees may move a
//! task between statuses. Every operation takes the acting user explicitly
//! as an [`crate::event::domain::Actor`] and rejects unauthorised calls
//! before touching storage. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
