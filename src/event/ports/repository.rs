//! Repository port for event persistence and lookup.

use crate::event::domain::{Event, EventId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for event repository operations.
pub type EventRepositoryResult<T> = Result<T, EventRepositoryError>;

/// Event persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Stores a new event.
    ///
    /// # Errors
    ///
    /// Returns [`EventRepositoryError::DuplicateEvent`] when the identifier
    /// already exists.
    async fn store(&self, event: &Event) -> EventRepositoryResult<()>;

    /// Persists changes to an existing event.
    ///
    /// # Errors
    ///
    /// Returns [`EventRepositoryError::NotFound`] when the event does not
    /// exist.
    async fn update(&self, event: &Event) -> EventRepositoryResult<()>;

    /// Finds an event by identifier.
    ///
    /// Returns `None` when the event does not exist.
    async fn find_by_id(&self, id: EventId) -> EventRepositoryResult<Option<Event>>;
}

/// Errors returned by event repository implementations.
#[derive(Debug, Clone, Error)]
pub enum EventRepositoryError {
    /// An event with the same identifier already exists.
    #[error("duplicate event identifier: {0}")]
    DuplicateEvent(EventId),

    /// The event was not found.
    #[error("event not found: {0}")]
    NotFound(EventId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl EventRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
