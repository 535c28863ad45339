//! Service layer for AI-assisted event creation, copying and follow-up.

use super::{PlanningConfig, prompts};
use crate::event::{
    domain::{Actor, Event, EventId},
    ports::EventRepository,
    services::{CreateEventRequest, EventAccessError, EventAccessService},
};
use crate::identity::domain::UserIdentity;
use crate::planning::{
    domain::{
        DateRules, EventPlan, FollowUpSuggestions, PlanLanguage, PlanRequest, PlannedTask,
        PlanningDomainError, extract_json, extract_requested_date, parse_follow_up, parse_plan,
    },
    ports::{AiClient, AiClientError, AiRequest, AiResponse},
};
use crate::task::{
    domain::Task,
    ports::TaskRepository,
    services::{CreateTaskRequest, TaskLifecycleError, TaskLifecycleService},
};
use chrono::NaiveDate;
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for copying an event into a new edition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyEventRequest {
    title: Option<String>,
    date: Option<NaiveDate>,
    time: Option<String>,
    location: Option<String>,
    language: PlanLanguage,
    extra_tasks: Vec<PlannedTask>,
}

impl CopyEventRequest {
    /// Creates a request that keeps the source title with an edition suffix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the new date. Without it the copy has no date.
    #[must_use]
    pub const fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Overrides the start time.
    #[must_use]
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Overrides the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the language used for the default title suffix.
    #[must_use]
    pub const fn with_language(mut self, language: PlanLanguage) -> Self {
        self.language = language;
        self
    }

    /// Adds tasks beyond the copied ones, typically from follow-up
    /// suggestions.
    #[must_use]
    pub fn with_extra_tasks(mut self, tasks: impl IntoIterator<Item = PlannedTask>) -> Self {
        self.extra_tasks.extend(tasks);
        self
    }
}

/// Event created by the planning service together with its tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedEvent {
    /// The new event.
    pub event: Event,
    /// Tasks created for it, all pending and unclaimed.
    pub tasks: Vec<Task>,
}

/// Service-level errors for planning operations.
#[derive(Debug, Error)]
pub enum PlanningError {
    /// Input or response validation failed.
    #[error(transparent)]
    Domain(#[from] PlanningDomainError),
    /// The AI service failed.
    #[error(transparent)]
    Ai(#[from] AiClientError),
    /// Event creation or lookup failed.
    #[error(transparent)]
    Event(#[from] EventAccessError),
    /// Task creation or lookup failed.
    #[error(transparent)]
    Task(#[from] TaskLifecycleError),
    /// A prompt template failed to render.
    #[error("failed to render {template} prompt: {reason}")]
    TemplateRender {
        /// Template name.
        template: &'static str,
        /// Renderer message.
        reason: String,
    },
    /// Only the organizer of the event may perform the operation.
    #[error("only the organizer of event {0} may do this")]
    OrganizerOnly(EventId),
    /// No event exists with the given identifier.
    #[error("event {0} not found")]
    NotFound(EventId),
}

/// Result type for planning operations.
pub type PlanningResult<T> = Result<T, PlanningError>;

/// AI-assisted event planning service.
#[derive(Clone)]
pub struct EventPlanningService<E, T, A, C>
where
    E: EventRepository,
    T: TaskRepository,
    A: AiClient,
    C: Clock + Send + Sync,
{
    events: EventAccessService<E, C>,
    tasks: TaskLifecycleService<T, C>,
    ai: Arc<A>,
    clock: Arc<C>,
    config: PlanningConfig,
}

fn response_value(response: AiResponse) -> Result<Value, PlanningDomainError> {
    match response {
        AiResponse::Structured(Value::String(text)) | AiResponse::Text(text) => {
            extract_json(&text)
        }
        AiResponse::Structured(value) => Ok(value),
    }
}

fn planned_request(task: PlannedTask) -> CreateTaskRequest {
    let request = CreateTaskRequest::new(task.name.as_str())
        .with_stage(task.stage)
        .with_priority(task.priority);
    match task.description {
        Some(description) => request.with_description(description),
        None => request,
    }
}

fn copied_request(task: &Task) -> CreateTaskRequest {
    let request = CreateTaskRequest::new(task.name().as_str())
        .with_stage(task.stage())
        .with_priority(task.priority());
    match task.description() {
        Some(description) => request.with_description(description),
        None => request,
    }
}

fn log_ai_failure(err: &AiClientError) {
    tracing::error!(error = %err, "AI invocation failed");
}

impl<E, T, A, C> EventPlanningService<E, T, A, C>
where
    E: EventRepository,
    T: TaskRepository,
    A: AiClient,
    C: Clock + Send + Sync,
{
    /// Creates a new planning service with the default configuration.
    #[must_use]
    pub const fn new(
        events: EventAccessService<E, C>,
        tasks: TaskLifecycleService<T, C>,
        ai: Arc<A>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            events,
            tasks,
            ai,
            clock,
            config: PlanningConfig::standard(),
        }
    }

    /// Replaces the service configuration.
    #[must_use]
    pub const fn with_config(mut self, config: PlanningConfig) -> Self {
        self.config = config;
        self
    }

    fn ensure_organizer(actor: &Actor) -> PlanningResult<()> {
        if actor.is_organizer() {
            return Ok(());
        }
        tracing::warn!(
            event_id = %actor.event_id(),
            user = %actor.email(),
            "organizer-only planning operation rejected"
        );
        Err(PlanningError::OrganizerOnly(actor.event_id()))
    }

    async fn source_event(&self, actor: &Actor) -> PlanningResult<Event> {
        self.events
            .find_by_id(actor.event_id())
            .await?
            .ok_or(PlanningError::NotFound(actor.event_id()))
    }

    async fn ask(&self, prompt: String, schema: Value) -> PlanningResult<Value> {
        let request = AiRequest::new(prompt).with_response_schema(schema);
        let response = self.ai.invoke(request).await.inspect_err(log_ai_failure)?;
        Ok(response_value(response)?)
    }

    /// Asks the AI service for an event plan.
    ///
    /// When the request carries no date, a date written in the description
    /// is used instead. A pinned date always replaces the AI's date; an AI
    /// date in the past is moved forward.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningDomainError::EmptyDescription`] for a blank
    /// description, [`PlanningError::Ai`] when the AI call fails, and
    /// [`PlanningDomainError`] variants for unusable responses.
    pub async fn generate_plan(&self, request: PlanRequest) -> PlanningResult<EventPlan> {
        let description = request.description().trim();
        if description.is_empty() {
            return Err(PlanningDomainError::EmptyDescription.into());
        }
        let rules = DateRules {
            today: self.clock.utc().date_naive(),
            requested: request
                .requested_date()
                .or_else(|| extract_requested_date(description)),
            past_date_shift_months: self.config.past_date_shift_months,
        };
        let prompt = prompts::plan_prompt(request.language(), description, &rules)?;
        let value = self.ask(prompt, prompts::plan_schema()).await?;
        let mut plan = parse_plan(value, &rules)?;
        plan.tasks.truncate(self.config.max_planned_tasks);
        tracing::info!(
            title = %plan.event.title,
            date = ?plan.event.details.date,
            tasks = plan.tasks.len(),
            "event plan generated"
        );
        Ok(plan)
    }

    /// Creates the planned event with `organizer` as its organizer, then
    /// creates every planned task as pending.
    ///
    /// Task requests are validated before the event is stored, so an
    /// invalid task leaves no event behind.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::Task`] for a planned task the lifecycle
    /// service rejects, and [`PlanningError::Event`] or
    /// [`PlanningError::Task`] when creation fails.
    pub async fn create_event_from_plan(
        &self,
        organizer: &UserIdentity,
        plan: EventPlan,
    ) -> PlanningResult<CreatedEvent> {
        let EventPlan { event: draft, tasks } = plan;
        let requests: Vec<CreateTaskRequest> = tasks.into_iter().map(planned_request).collect();
        self.tasks.validate_requests(&requests)?;
        let request = CreateEventRequest::new(draft.title.as_str()).with_details(draft.details);
        let event = self.events.create_event(organizer, request).await?;
        let actor = self.events.resolve_actor(event.id(), organizer).await?;
        let created = self.tasks.create_tasks(&actor, requests).await?;
        tracing::info!(event_id = %event.id(), tasks = created.len(), "event created from plan");
        Ok(CreatedEvent {
            event,
            tasks: created,
        })
    }

    /// Copies the actor's event into a new edition.
    ///
    /// The copy keeps the organizer and event details, takes the date from
    /// the request, and recreates every task as pending and unclaimed, plus
    /// any extra tasks from the request.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::OrganizerOnly`] unless the actor organizes
    /// the source event, and [`PlanningError::Task`] before anything is
    /// stored when a copied or extra task fails validation.
    pub async fn copy_event(
        &self,
        actor: &Actor,
        request: CopyEventRequest,
    ) -> PlanningResult<CreatedEvent> {
        Self::ensure_organizer(actor)?;
        let source = self.source_event(actor).await?;
        let source_tasks = self.tasks.list_for_event(actor).await?;

        let CopyEventRequest {
            title,
            date,
            time,
            location,
            language,
            extra_tasks,
        } = request;
        let new_title = title
            .unwrap_or_else(|| format!("{}{}", source.title(), language.copy_title_suffix()));
        let mut details = source.details().clone();
        details.date = date;
        if time.is_some() {
            details.time = time;
        }
        if location.is_some() {
            details.location = location;
        }

        let requests: Vec<CreateTaskRequest> = source_tasks
            .iter()
            .map(copied_request)
            .chain(extra_tasks.into_iter().map(planned_request))
            .collect();
        self.tasks.validate_requests(&requests)?;

        let event = self
            .events
            .create_event(
                actor.identity(),
                CreateEventRequest::new(new_title).with_details(details),
            )
            .await?;
        let organizer = self.events.resolve_actor(event.id(), actor.identity()).await?;
        let tasks = self.tasks.create_tasks(&organizer, requests).await?;
        tracing::info!(
            source_event_id = %source.id(),
            event_id = %event.id(),
            tasks = tasks.len(),
            "event copied"
        );
        Ok(CreatedEvent { event, tasks })
    }

    /// Asks the AI service how to improve the next edition of the actor's
    /// event, based on its task statistics.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::OrganizerOnly`] unless the actor organizes
    /// the event, and [`PlanningError::Ai`] when the AI call fails.
    pub async fn suggest_follow_up(
        &self,
        actor: &Actor,
        language: PlanLanguage,
    ) -> PlanningResult<FollowUpSuggestions> {
        Self::ensure_organizer(actor)?;
        let event = self.source_event(actor).await?;
        let summary = self.tasks.summarize_event(actor).await?;
        let prompt = prompts::follow_up_prompt(language, &event, &summary)?;
        let value = self.ask(prompt, prompts::follow_up_schema()).await?;
        let suggestions = parse_follow_up(value)?;
        tracing::info!(
            event_id = %event.id(),
            new_tasks = suggestions.new_tasks.len(),
            "follow-up suggestions generated"
        );
        Ok(suggestions)
    }
}
