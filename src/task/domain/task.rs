//! Task aggregate root and the inputs used to create and edit it.

use super::{
    Assignee, Solution, TaskAction, TaskDomainError, TaskId, TaskName, TaskPriority, TaskStage,
    TaskStatus, TransitionPolicy,
};
use crate::event::domain::{Actor, EventId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated fields for a new task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    /// Task name.
    pub name: TaskName,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Planning stage.
    pub stage: TaskStage,
    /// Urgency.
    pub priority: TaskPriority,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
}

impl TaskDraft {
    /// Creates a draft with default stage and priority.
    #[must_use]
    pub fn new(name: TaskName) -> Self {
        Self {
            name,
            description: None,
            stage: TaskStage::default(),
            priority: TaskPriority::default(),
            due_date: None,
        }
    }
}

/// Partial update of task metadata.
///
/// `None` leaves a field untouched. For the clearable fields the inner
/// `Option` carries the new value, so `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    /// Replacement name.
    pub name: Option<TaskName>,
    /// Replacement or cleared description.
    pub description: Option<Option<String>>,
    /// Replacement stage.
    pub stage: Option<TaskStage>,
    /// Replacement priority.
    pub priority: Option<TaskPriority>,
    /// Replacement or cleared due date.
    pub due_date: Option<Option<NaiveDate>>,
}

impl TaskEdit {
    /// Returns whether the edit changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.stage.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    event_id: EventId,
    name: TaskName,
    description: Option<String>,
    stage: TaskStage,
    priority: TaskPriority,
    status: TaskStatus,
    assignee: Option<Assignee>,
    due_date: Option<NaiveDate>,
    solution: Option<Solution>,
    claimed_at: Option<DateTime<Utc>>,
    submitted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning event.
    pub event_id: EventId,
    /// Persisted name.
    pub name: TaskName,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted stage.
    pub stage: TaskStage,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted assignee, if claimed.
    pub assignee: Option<Assignee>,
    /// Persisted due date.
    pub due_date: Option<NaiveDate>,
    /// Persisted solution, if submitted.
    pub solution: Option<Solution>,
    /// Claim timestamp.
    pub claimed_at: Option<DateTime<Utc>>,
    /// Submission timestamp.
    pub submitted_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a pending, unclaimed task for the actor's event.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::CreateDenied`] unless the actor organizes
    /// the event.
    pub fn create(
        actor: &Actor,
        draft: TaskDraft,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        if !actor.is_organizer() {
            return Err(TaskDomainError::CreateDenied(actor.event_id()));
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            event_id: actor.event_id(),
            name: draft.name,
            description: draft.description,
            stage: draft.stage,
            priority: draft.priority,
            status: TaskStatus::Pending,
            assignee: None,
            due_date: draft.due_date,
            solution: None,
            claimed_at: None,
            submitted_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            event_id: data.event_id,
            name: data.name,
            description: data.description,
            stage: data.stage,
            priority: data.priority,
            status: data.status,
            assignee: data.assignee,
            due_date: data.due_date,
            solution: data.solution,
            claimed_at: data.claimed_at,
            submitted_at: data.submitted_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning event.
    #[must_use]
    pub const fn event_id(&self) -> EventId {
        self.event_id
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the planning stage.
    #[must_use]
    pub const fn stage(&self) -> TaskStage {
        self.stage
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assignee, if the task is claimed.
    #[must_use]
    pub const fn assignee(&self) -> Option<&Assignee> {
        self.assignee.as_ref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the submitted solution, if any.
    #[must_use]
    pub const fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// Returns when the task was claimed.
    #[must_use]
    pub const fn claimed_at(&self) -> Option<DateTime<Utc>> {
        self.claimed_at
    }

    /// Returns when the solution was submitted.
    #[must_use]
    pub const fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether someone has claimed the task.
    #[must_use]
    pub const fn is_claimed(&self) -> bool {
        self.assignee.is_some()
    }

    /// Checks that `actor` may perform `action`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AlreadyClaimed`] when claiming a task that
    /// has an assignee, and [`TaskDomainError::PermissionDenied`] for every
    /// other refusal.
    pub fn ensure_permitted(&self, actor: &Actor, action: TaskAction) -> Result<(), TaskDomainError> {
        if matches!(action, TaskAction::Claim)
            && self.event_id == actor.event_id()
            && self.is_claimed()
        {
            return Err(TaskDomainError::AlreadyClaimed(self.id));
        }
        if self.permits(actor, action) {
            Ok(())
        } else {
            Err(TaskDomainError::PermissionDenied {
                task_id: self.id,
                action,
            })
        }
    }

    /// Assigns the task to `actor` and marks it in progress.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AlreadyClaimed`] when the task already has
    /// an assignee.
    pub fn claim(&mut self, actor: &Actor, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_permitted(actor, TaskAction::Claim)?;
        let timestamp = clock.utc();
        self.assignee = Some(Assignee::from(actor.identity()));
        self.status = TaskStatus::InProgress;
        self.claimed_at = Some(timestamp);
        self.updated_at = timestamp;
        Ok(())
    }

    /// Records the assignee's solution and completes the task.
    ///
    /// The transition policy does not apply to submissions.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::PermissionDenied`] unless `actor` is the
    /// assignee.
    pub fn submit_solution(
        &mut self,
        actor: &Actor,
        solution: Solution,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_permitted(actor, TaskAction::SubmitSolution)?;
        let timestamp = clock.utc();
        self.solution = Some(solution);
        self.status = TaskStatus::Completed;
        self.submitted_at = Some(timestamp);
        self.updated_at = timestamp;
        Ok(())
    }

    /// Applies a metadata edit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::PermissionDenied`] unless `actor` organizes
    /// the event.
    pub fn apply_edit(
        &mut self,
        actor: &Actor,
        edit: TaskEdit,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_permitted(actor, TaskAction::Edit)?;
        let TaskEdit {
            name,
            description,
            stage,
            priority,
            due_date,
        } = edit;
        if let Some(new_name) = name {
            self.name = new_name;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
        if let Some(new_stage) = stage {
            self.stage = new_stage;
        }
        if let Some(new_priority) = priority {
            self.priority = new_priority;
        }
        if let Some(new_due_date) = due_date {
            self.due_date = new_due_date;
        }
        self.touch(clock);
        Ok(())
    }

    /// Sets the status manually.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::PermissionDenied`] unless `actor` is the
    /// organizer or the assignee, and
    /// [`TaskDomainError::InvalidStatusTransition`] when `policy` forbids the
    /// change.
    pub fn update_status(
        &mut self,
        actor: &Actor,
        status: TaskStatus,
        policy: TransitionPolicy,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_permitted(actor, TaskAction::UpdateStatus)?;
        if !self.status.can_transition_to(status, policy) {
            return Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: self.status,
                to: status,
            });
        }
        self.status = status;
        self.touch(clock);
        Ok(())
    }

    /// Removes the assignee and any submitted solution, returning the task
    /// to pending.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::PermissionDenied`] unless `actor` is the
    /// organizer or the assignee, and [`TaskDomainError::NotClaimed`] when
    /// there is no assignee.
    pub fn release(&mut self, actor: &Actor, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_permitted(actor, TaskAction::Release)?;
        if !self.is_claimed() {
            return Err(TaskDomainError::NotClaimed(self.id));
        }
        self.assignee = None;
        self.claimed_at = None;
        self.solution = None;
        self.submitted_at = None;
        self.status = TaskStatus::Pending;
        self.touch(clock);
        Ok(())
    }

    /// Checks that `actor` may delete the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::PermissionDenied`] unless `actor` organizes
    /// the event.
    pub fn ensure_can_delete(&self, actor: &Actor) -> Result<(), TaskDomainError> {
        self.ensure_permitted(actor, TaskAction::Delete)
    }

    /// Copies the editable metadata of `source` onto this task.
    pub(crate) fn adopt_details(&mut self, source: &Self) {
        self.name = source.name.clone();
        self.description.clone_from(&source.description);
        self.stage = source.stage;
        self.priority = source.priority;
        self.due_date = source.due_date;
        self.updated_at = source.updated_at;
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
