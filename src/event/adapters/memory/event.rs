//! In-memory repository for events.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::event::{
    domain::{Event, EventId},
    ports::{EventRepository, EventRepositoryError, EventRepositoryResult},
};

/// Thread-safe in-memory event repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<HashMap<EventId, Event>>>,
}

impl InMemoryEventRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> EventRepositoryError {
    EventRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn store(&self, event: &Event) -> EventRepositoryResult<()> {
        let mut events = self.events.write().map_err(lock_error)?;
        if events.contains_key(&event.id()) {
            return Err(EventRepositoryError::DuplicateEvent(event.id()));
        }
        events.insert(event.id(), event.clone());
        Ok(())
    }

    async fn update(&self, event: &Event) -> EventRepositoryResult<()> {
        let mut events = self.events.write().map_err(lock_error)?;
        let slot = events
            .get_mut(&event.id())
            .ok_or(EventRepositoryError::NotFound(event.id()))?;
        *slot = event.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: EventId) -> EventRepositoryResult<Option<Event>> {
        let events = self.events.read().map_err(lock_error)?;
        Ok(events.get(&id).cloned())
    }
}
