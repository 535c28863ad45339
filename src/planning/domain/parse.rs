//! Decoding of AI responses into plans and suggestions.
//!
//! AI output is loosely typed: fields may be missing, null, numbers written
//! as strings, or labels in either language. Decoding is lenient about all
//! of these and strict only about the event title.

use super::{
    DateRules, EventDraft, EventPlan, FollowUpSuggestions, PlannedTask, PlanningDomainError,
};
use crate::event::domain::{EventDetails, EventTitle};
use crate::task::domain::{TaskName, TaskPriority, TaskStage};
use serde::Deserialize;
use serde_json::{Number, Value};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPlan {
    event: RawEvent,
    tasks: Option<Vec<RawTask>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEvent {
    title: Option<String>,
    date: Option<String>,
    time: Option<String>,
    location: Option<String>,
    #[serde(rename = "type")]
    event_type: Option<String>,
    scale: Option<Value>,
    description: Option<String>,
    special_requirements: Option<Vec<String>>,
    organizer: Option<String>,
    budget: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTask {
    name: Option<String>,
    description: Option<String>,
    stage: Option<String>,
    priority: Option<String>,
    reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFollowUp {
    improvements: Option<Vec<String>>,
    new_tasks: Option<Vec<RawTask>>,
    timeline_suggestions: Option<String>,
    budget_optimization: Option<String>,
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

fn scale_from(value: Option<Value>) -> Option<u32> {
    match value? {
        Value::Number(number) => number.as_u64().and_then(|raw| u32::try_from(raw).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn budget_from(value: Option<Value>) -> Option<Number> {
    match value? {
        Value::Number(number) => Some(number),
        Value::String(text) => serde_json::from_str::<Number>(text.trim()).ok(),
        _ => None,
    }
}

impl RawTask {
    /// Returns `None` for tasks without a usable name.
    fn into_planned(self) -> Option<PlannedTask> {
        let name = TaskName::new(self.name?).ok()?;
        let stage = self
            .stage
            .as_deref()
            .and_then(|label| TaskStage::try_from(label).ok())
            .unwrap_or_default();
        let priority = self
            .priority
            .as_deref()
            .and_then(|label| TaskPriority::try_from(label).ok())
            .unwrap_or_default();
        Some(PlannedTask {
            name,
            description: clean(self.description),
            stage,
            priority,
            reason: clean(self.reason),
        })
    }
}

fn planned_tasks(raw: Option<Vec<RawTask>>) -> Vec<PlannedTask> {
    raw.unwrap_or_default()
        .into_iter()
        .filter_map(RawTask::into_planned)
        .collect()
}

fn malformed(err: &serde_json::Error) -> PlanningDomainError {
    PlanningDomainError::MalformedResponse(err.to_string())
}

/// Extracts the JSON object from a text response.
///
/// The object may be surrounded by prose or wrapped in Markdown code fences.
///
/// # Errors
///
/// Returns [`PlanningDomainError::MalformedResponse`] when no JSON object can
/// be decoded.
pub fn extract_json(text: &str) -> Result<Value, PlanningDomainError> {
    let start = text.find('{');
    let end = text.rfind('}');
    let candidate = match (start, end) {
        (Some(open), Some(close)) if open < close => text.get(open..=close),
        _ => None,
    }
    .ok_or_else(|| PlanningDomainError::MalformedResponse("no JSON object found".to_owned()))?;
    serde_json::from_str(candidate).map_err(|err| malformed(&err))
}

/// Decodes a plan and settles its event date.
///
/// Tasks without a name are dropped; unknown stage and priority labels fall
/// back to preparation and medium.
///
/// # Errors
///
/// Returns [`PlanningDomainError::MalformedResponse`] when the value does not
/// have the plan shape and [`PlanningDomainError::MissingEventTitle`] when
/// the event title is blank.
pub fn parse_plan(value: Value, rules: &DateRules) -> Result<EventPlan, PlanningDomainError> {
    let raw: RawPlan = serde_json::from_value(value).map_err(|err| malformed(&err))?;
    let RawPlan { event, tasks } = raw;
    let title = event
        .title
        .and_then(|text| EventTitle::new(text).ok())
        .ok_or(PlanningDomainError::MissingEventTitle)?;
    let details = EventDetails {
        description: clean(event.description),
        date: rules.settle(event.date.as_deref()),
        time: clean(event.time),
        location: clean(event.location),
        event_type: clean(event.event_type),
        scale: scale_from(event.scale),
        special_requirements: event
            .special_requirements
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| clean(Some(item)))
            .collect(),
        contact: clean(event.organizer),
        budget: budget_from(event.budget),
    };
    Ok(EventPlan {
        event: EventDraft { title, details },
        tasks: planned_tasks(tasks),
    })
}

/// Decodes follow-up suggestions.
///
/// # Errors
///
/// Returns [`PlanningDomainError::MalformedResponse`] when the value does not
/// have the suggestion shape.
pub fn parse_follow_up(value: Value) -> Result<FollowUpSuggestions, PlanningDomainError> {
    let raw: RawFollowUp = serde_json::from_value(value).map_err(|err| malformed(&err))?;
    Ok(FollowUpSuggestions {
        improvements: raw
            .improvements
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| clean(Some(item)))
            .collect(),
        new_tasks: planned_tasks(raw.new_tasks),
        timeline_suggestions: clean(raw.timeline_suggestions),
        budget_optimization: clean(raw.budget_optimization),
    })
}
