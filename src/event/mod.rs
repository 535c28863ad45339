//! Events and event access for Convene.
//!
//! An event is owned by the user who created it (the organizer). Other users
//! gain access by joining and become participants. Resolving a user's role
//! for an event yields an [`domain::Actor`], which every task operation takes
//! explicitly. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
