//! Error types for event domain validation.

use super::EventId;
use crate::identity::domain::EmailAddress;
use thiserror::Error;

/// Errors returned while constructing or mutating events.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EventDomainError {
    /// The event title is empty after trimming.
    #[error("event title must not be empty")]
    EmptyTitle,

    /// The user has neither organized nor joined the event.
    #[error("{email} has no access to event {event_id}")]
    AccessDenied {
        /// Event the user tried to act on.
        event_id: EventId,
        /// Email of the rejected user.
        email: EmailAddress,
    },
}
