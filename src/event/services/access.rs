//! Service layer for event creation, joining and role resolution.

use crate::event::{
    domain::{Actor, Event, EventDetails, EventDomainError, EventId, EventTitle},
    ports::{EventRepository, EventRepositoryError},
};
use crate::identity::domain::UserIdentity;
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating an event by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEventRequest {
    title: String,
    details: EventDetails,
}

impl CreateEventRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            details: EventDetails::default(),
        }
    }

    /// Replaces all optional details at once.
    #[must_use]
    pub fn with_details(mut self, details: EventDetails) -> Self {
        self.details = details;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.details.description = Some(description.into());
        self
    }

    /// Sets the calendar date.
    #[must_use]
    pub const fn with_date(mut self, date: NaiveDate) -> Self {
        self.details.date = Some(date);
        self
    }

    /// Sets the start time text.
    #[must_use]
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.details.time = Some(time.into());
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.details.location = Some(location.into());
        self
    }
}

/// Service-level errors for event access operations.
#[derive(Debug, Error)]
pub enum EventAccessError {
    /// Domain validation failed or access was denied.
    #[error(transparent)]
    Domain(#[from] EventDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] EventRepositoryError),
    /// No event exists with the given identifier.
    #[error("event {0} not found")]
    NotFound(EventId),
}

/// Result type for event access operations.
pub type EventAccessResult<T> = Result<T, EventAccessError>;

/// Event creation and access orchestration service.
#[derive(Clone)]
pub struct EventAccessService<R, C>
where
    R: EventRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

fn log_store_failure(err: &EventRepositoryError) {
    tracing::error!(error = %err, "event store call failed");
}

impl<R, C> EventAccessService<R, C>
where
    R: EventRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new event access service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    async fn find_event_or_error(&self, event_id: EventId) -> EventAccessResult<Event> {
        self.repository
            .find_by_id(event_id)
            .await
            .inspect_err(log_store_failure)?
            .ok_or(EventAccessError::NotFound(event_id))
    }

    /// Creates an event organized by `organizer`.
    ///
    /// # Errors
    ///
    /// Returns [`EventAccessError`] when the title is blank or the repository
    /// rejects persistence.
    pub async fn create_event(
        &self,
        organizer: &UserIdentity,
        request: CreateEventRequest,
    ) -> EventAccessResult<Event> {
        let title = EventTitle::new(request.title)?;
        let event = Event::new(title, request.details, organizer, &*self.clock);
        self.repository
            .store(&event)
            .await
            .inspect_err(log_store_failure)?;
        tracing::info!(
            event_id = %event.id(),
            organizer = %organizer.email(),
            "event created"
        );
        Ok(event)
    }

    /// Adds `identity` to the event's participants.
    ///
    /// Joining an event the user already has access to succeeds without a
    /// store call.
    ///
    /// # Errors
    ///
    /// Returns [`EventAccessError::NotFound`] for unknown events, or
    /// persistence errors.
    pub async fn join(&self, event_id: EventId, identity: &UserIdentity) -> EventAccessResult<Event> {
        let mut event = self.find_event_or_error(event_id).await?;
        if event.join(identity, &*self.clock) {
            self.repository
                .update(&event)
                .await
                .inspect_err(log_store_failure)?;
            tracing::info!(%event_id, participant = %identity.email(), "participant joined event");
        }
        Ok(event)
    }

    /// Resolves the role `identity` holds in the event.
    ///
    /// # Errors
    ///
    /// Returns [`EventAccessError::NotFound`] for unknown events and
    /// [`EventDomainError::AccessDenied`] when the user neither organizes nor
    /// joined the event.
    pub async fn resolve_actor(
        &self,
        event_id: EventId,
        identity: &UserIdentity,
    ) -> EventAccessResult<Actor> {
        let event = self.find_event_or_error(event_id).await?;
        let role = event.role_of(identity.email()).ok_or_else(|| {
            tracing::warn!(%event_id, user = %identity.email(), "event access denied");
            EventDomainError::AccessDenied {
                event_id,
                email: identity.email().clone(),
            }
        })?;
        Ok(Actor::new(identity.clone(), event_id, role))
    }

    /// Finds an event by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`EventAccessError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, event_id: EventId) -> EventAccessResult<Option<Event>> {
        Ok(self
            .repository
            .find_by_id(event_id)
            .await
            .inspect_err(log_store_failure)?)
    }
}
