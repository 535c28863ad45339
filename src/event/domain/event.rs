//! Event aggregate root.

use super::{ActorRole, EventId, EventTitle};
use crate::identity::domain::{EmailAddress, UserIdentity};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::BTreeSet;

/// Optional descriptive fields of an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetails {
    /// Free-text description.
    pub description: Option<String>,
    /// Calendar date of the event.
    pub date: Option<NaiveDate>,
    /// Free-text start time, as entered by the organizer.
    pub time: Option<String>,
    /// Venue or address.
    pub location: Option<String>,
    /// Kind of event, such as a meeting or workshop.
    pub event_type: Option<String>,
    /// Expected number of attendees.
    pub scale: Option<u32>,
    /// Special requirements raised while planning.
    pub special_requirements: Vec<String>,
    /// Name of the person responsible, as written on the plan.
    pub contact: Option<String>,
    /// Planned budget.
    pub budget: Option<Number>,
}

/// Event aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    title: EventTitle,
    details: EventDetails,
    organizer: EmailAddress,
    participants: BTreeSet<EmailAddress>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedEventData {
    /// Persisted event identifier.
    pub id: EventId,
    /// Persisted title.
    pub title: EventTitle,
    /// Persisted descriptive fields.
    pub details: EventDetails,
    /// Email of the user who created the event.
    pub organizer: EmailAddress,
    /// Emails of users who joined the event.
    pub participants: BTreeSet<EmailAddress>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Creates a new event organized by `organizer`.
    #[must_use]
    pub fn new(
        title: EventTitle,
        details: EventDetails,
        organizer: &UserIdentity,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: EventId::new(),
            title,
            details,
            organizer: organizer.email().clone(),
            participants: BTreeSet::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs an event from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedEventData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            details: data.details,
            organizer: data.organizer,
            participants: data.participants,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the event identifier.
    #[must_use]
    pub const fn id(&self) -> EventId {
        self.id
    }

    /// Returns the event title.
    #[must_use]
    pub const fn title(&self) -> &EventTitle {
        &self.title
    }

    /// Returns the descriptive fields.
    #[must_use]
    pub const fn details(&self) -> &EventDetails {
        &self.details
    }

    /// Returns the organizer's email.
    #[must_use]
    pub const fn organizer(&self) -> &EmailAddress {
        &self.organizer
    }

    /// Returns the emails of users who joined.
    #[must_use]
    pub const fn participants(&self) -> &BTreeSet<EmailAddress> {
        &self.participants
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the role `email` holds in this event, if any.
    #[must_use]
    pub fn role_of(&self, email: &EmailAddress) -> Option<ActorRole> {
        if &self.organizer == email {
            Some(ActorRole::Organizer)
        } else if self.participants.contains(email) {
            Some(ActorRole::Participant)
        } else {
            None
        }
    }

    /// Adds `identity` as a participant.
    ///
    /// Returns `false` without touching the event when the user already has
    /// access (including the organizer).
    pub fn join(&mut self, identity: &UserIdentity, clock: &impl Clock) -> bool {
        if self.role_of(identity.email()).is_some() {
            return false;
        }
        self.participants.insert(identity.email().clone());
        self.updated_at = clock.utc();
        true
    }
}
