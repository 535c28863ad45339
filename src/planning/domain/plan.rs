//! Event plans produced by the AI service.

use super::PlanLanguage;
use crate::event::domain::{EventDetails, EventTitle};
use crate::task::domain::{TaskName, TaskPriority, TaskStage};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Input for generating an event plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    description: String,
    language: PlanLanguage,
    requested_date: Option<NaiveDate>,
}

impl PlanRequest {
    /// Creates a request from the organizer's free-text description.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            language: PlanLanguage::default(),
            requested_date: None,
        }
    }

    /// Sets the prompt language.
    #[must_use]
    pub const fn with_language(mut self, language: PlanLanguage) -> Self {
        self.language = language;
        self
    }

    /// Pins the event date, overriding whatever the AI proposes.
    #[must_use]
    pub const fn with_requested_date(mut self, date: NaiveDate) -> Self {
        self.requested_date = Some(date);
        self
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the prompt language.
    #[must_use]
    pub const fn language(&self) -> PlanLanguage {
        self.language
    }

    /// Returns the pinned date, if any.
    #[must_use]
    pub const fn requested_date(&self) -> Option<NaiveDate> {
        self.requested_date
    }
}

/// Event metadata of a generated plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    /// Event title.
    pub title: EventTitle,
    /// Remaining event fields.
    pub details: EventDetails,
}

/// Task proposed by the AI service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedTask {
    /// Task name.
    pub name: TaskName,
    /// Optional description.
    pub description: Option<String>,
    /// Planning stage.
    pub stage: TaskStage,
    /// Urgency.
    pub priority: TaskPriority,
    /// Why the task was suggested, for follow-up suggestions.
    pub reason: Option<String>,
}

/// Generated event plan: event metadata plus its tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPlan {
    /// Event metadata.
    pub event: EventDraft,
    /// Proposed tasks, in the order the AI listed them.
    pub tasks: Vec<PlannedTask>,
}

/// Advice for running a similar event again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpSuggestions {
    /// General improvements.
    pub improvements: Vec<String>,
    /// Tasks to add to the next edition.
    pub new_tasks: Vec<PlannedTask>,
    /// Scheduling advice.
    pub timeline_suggestions: Option<String>,
    /// Budget advice.
    pub budget_optimization: Option<String>,
}
