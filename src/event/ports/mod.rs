//! Port contracts for event persistence.

pub mod repository;

pub use repository::{EventRepository, EventRepositoryError, EventRepositoryResult};

#[cfg(test)]
pub use repository::MockEventRepository;
