//! Roles and acting users bound to a single event.

use super::EventId;
use crate::identity::domain::{EmailAddress, UserIdentity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a user holds within one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// The user who created the event.
    Organizer,
    /// Any other user who joined the event.
    Participant,
}

impl ActorRole {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Organizer => "organizer",
            Self::Participant => "participant",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user acting within one event, with the role they hold there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    identity: UserIdentity,
    event_id: EventId,
    role: ActorRole,
}

impl Actor {
    /// Creates an actor. Prefer resolving actors through
    /// [`crate::event::services::EventAccessService::resolve_actor`], which
    /// derives the role from event ownership.
    #[must_use]
    pub const fn new(identity: UserIdentity, event_id: EventId, role: ActorRole) -> Self {
        Self {
            identity,
            event_id,
            role,
        }
    }

    /// Returns the acting user's identity.
    #[must_use]
    pub const fn identity(&self) -> &UserIdentity {
        &self.identity
    }

    /// Returns the acting user's email.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        self.identity.email()
    }

    /// Returns the event this actor is bound to.
    #[must_use]
    pub const fn event_id(&self) -> EventId {
        self.event_id
    }

    /// Returns the actor's role within the event.
    #[must_use]
    pub const fn role(&self) -> ActorRole {
        self.role
    }

    /// Returns whether the actor organizes the event.
    #[must_use]
    pub const fn is_organizer(&self) -> bool {
        matches!(self.role, ActorRole::Organizer)
    }

    /// Returns whether the actor organizes `event_id` specifically.
    #[must_use]
    pub fn organizes(&self, event_id: EventId) -> bool {
        self.is_organizer() && self.event_id == event_id
    }
}
