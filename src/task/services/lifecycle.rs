//! Service layer for task creation, claiming, submission and status changes.
//!
//! Every mutating operation loads the task, checks the actor's permission
//! before validating input, applies the change on the aggregate and issues a
//! single repository call.

use super::LifecycleConfig;
use crate::event::domain::Actor;
use crate::task::{
    domain::{
        ParseTaskLabelError, Solution, Task, TaskAction, TaskDomainError, TaskDraft, TaskEdit,
        TaskId, TaskName, TaskPermissions, TaskPriority, TaskStage, TaskStatus, TaskSummary,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    name: String,
    description: Option<String>,
    stage: TaskStage,
    priority: TaskPriority,
    due_date: Option<NaiveDate>,
}

impl CreateTaskRequest {
    /// Creates a request with the required task name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            stage: TaskStage::default(),
            priority: TaskPriority::default(),
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the planning stage.
    #[must_use]
    pub const fn with_stage(mut self, stage: TaskStage) -> Self {
        self.stage = stage;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    fn validated_name(&self, config: &LifecycleConfig) -> Result<TaskName, TaskDomainError> {
        TaskName::with_limit(self.name.as_str(), config.max_task_name_chars)
    }

    fn into_draft(self, config: &LifecycleConfig) -> Result<TaskDraft, TaskDomainError> {
        Ok(TaskDraft {
            name: self.validated_name(config)?,
            description: self.description,
            stage: self.stage,
            priority: self.priority,
            due_date: self.due_date,
        })
    }
}

/// Request payload for submitting a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitSolutionRequest {
    text: String,
    files: Vec<String>,
}

impl SubmitSolutionRequest {
    /// Creates a request with the solution text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            files: Vec::new(),
        }
    }

    /// Attaches uploaded file references.
    #[must_use]
    pub fn with_files(mut self, files: impl IntoIterator<Item = String>) -> Self {
        self.files = files.into_iter().collect();
        self
    }
}

/// Request payload for editing task metadata.
///
/// Fields that are never set stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditTaskRequest {
    name: Option<String>,
    description: Option<Option<String>>,
    stage: Option<TaskStage>,
    priority: Option<TaskPriority>,
    due_date: Option<Option<NaiveDate>>,
}

impl EditTaskRequest {
    /// Creates an empty edit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the task.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Moves the task to another stage.
    #[must_use]
    pub const fn with_stage(mut self, stage: TaskStage) -> Self {
        self.stage = Some(stage);
        self
    }

    /// Changes the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    /// Removes the due date.
    #[must_use]
    pub const fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    fn into_edit(self, config: &LifecycleConfig) -> Result<TaskEdit, TaskDomainError> {
        let name = self
            .name
            .map(|value| TaskName::with_limit(value, config.max_task_name_chars))
            .transpose()?;
        Ok(TaskEdit {
            name,
            description: self.description,
            stage: self.stage,
            priority: self.priority,
            due_date: self.due_date,
        })
    }
}

/// Coarse classification of lifecycle failures for callers that map errors
/// onto user messages or status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskErrorCategory {
    /// Input failed validation or the requested change is not allowed in the
    /// task's current state.
    Validation,
    /// The acting user lacks the required role.
    PermissionDenied,
    /// The task already has an assignee.
    AlreadyClaimed,
    /// The task does not exist.
    NotFound,
    /// The backing store failed.
    Store,
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation or a permission check failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// A status label could not be parsed.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskLabelError),
    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),
}

impl TaskLifecycleError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn category(&self) -> TaskErrorCategory {
        match self {
            Self::Domain(
                TaskDomainError::PermissionDenied { .. } | TaskDomainError::CreateDenied(_),
            ) => TaskErrorCategory::PermissionDenied,
            Self::Domain(TaskDomainError::AlreadyClaimed(_))
            | Self::Repository(TaskRepositoryError::ClaimConflict(_)) => {
                TaskErrorCategory::AlreadyClaimed
            }
            Self::Domain(_) | Self::InvalidStatus(_) => TaskErrorCategory::Validation,
            Self::NotFound(_) | Self::Repository(TaskRepositoryError::NotFound(_)) => {
                TaskErrorCategory::NotFound
            }
            Self::Repository(_) => TaskErrorCategory::Store,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    config: LifecycleConfig,
}

fn log_rejection(task_id: TaskId, actor: &Actor, err: &TaskDomainError) {
    tracing::warn!(
        %task_id,
        user = %actor.email(),
        role = %actor.role(),
        error = %err,
        "task operation rejected"
    );
}

fn log_store_failure(err: &TaskRepositoryError) {
    tracing::error!(error = %err, "task store call failed");
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service with the default configuration.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            config: LifecycleConfig::permissive(),
        }
    }

    /// Replaces the service configuration.
    #[must_use]
    pub const fn with_config(mut self, config: LifecycleConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    async fn find_task_or_error(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await
            .inspect_err(log_store_failure)?
            .ok_or(TaskLifecycleError::NotFound(task_id))
    }

    fn ensure_permitted(
        task: &Task,
        actor: &Actor,
        action: TaskAction,
    ) -> Result<(), TaskDomainError> {
        task.ensure_permitted(actor, action)
            .inspect_err(|err| log_rejection(task.id(), actor, err))
    }

    fn ensure_can_create(actor: &Actor) -> Result<(), TaskDomainError> {
        if actor.is_organizer() {
            return Ok(());
        }
        tracing::warn!(
            event_id = %actor.event_id(),
            user = %actor.email(),
            "task creation rejected"
        );
        Err(TaskDomainError::CreateDenied(actor.event_id()))
    }

    async fn persist_update(&self, task: &Task) -> TaskLifecycleResult<()> {
        self.repository
            .update(task)
            .await
            .inspect_err(log_store_failure)?;
        Ok(())
    }

    /// Creates a pending, unclaimed task for the actor's event.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::CreateDenied`] unless the actor organizes
    /// the event, a validation error for a blank or overlong name, or a
    /// repository error.
    pub async fn create_task(
        &self,
        actor: &Actor,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        Self::ensure_can_create(actor)?;
        let draft = request.into_draft(&self.config)?;
        let task = Task::create(actor, draft, &*self.clock)?;
        self.repository
            .store(&task)
            .await
            .inspect_err(log_store_failure)?;
        tracing::info!(task_id = %task.id(), event_id = %task.event_id(), "task created");
        Ok(task)
    }

    /// Creates several tasks at once.
    ///
    /// All requests are validated before anything is stored; one invalid
    /// request rejects the whole batch.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::create_task`].
    pub async fn create_tasks(
        &self,
        actor: &Actor,
        requests: impl IntoIterator<Item = CreateTaskRequest>,
    ) -> TaskLifecycleResult<Vec<Task>> {
        Self::ensure_can_create(actor)?;
        let tasks = requests
            .into_iter()
            .map(|request| {
                let draft = request.into_draft(&self.config)?;
                Task::create(actor, draft, &*self.clock)
            })
            .collect::<Result<Vec<_>, TaskDomainError>>()?;
        if tasks.is_empty() {
            return Ok(tasks);
        }
        self.repository
            .store_all(&tasks)
            .await
            .inspect_err(log_store_failure)?;
        tracing::info!(event_id = %actor.event_id(), count = tasks.len(), "tasks created");
        Ok(tasks)
    }

    /// Validates requests against the configured limits without storing
    /// anything.
    ///
    /// No permission check is made, so this can run before the event that
    /// will own the tasks exists.
    ///
    /// # Errors
    ///
    /// Returns a validation error for the first blank or overlong name.
    pub fn validate_requests<'a>(
        &self,
        requests: impl IntoIterator<Item = &'a CreateTaskRequest>,
    ) -> TaskLifecycleResult<()> {
        for request in requests {
            request.validated_name(&self.config)?;
        }
        Ok(())
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self
            .repository
            .find_by_id(task_id)
            .await
            .inspect_err(log_store_failure)?)
    }

    /// Lists the tasks of the actor's event.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn list_for_event(&self, actor: &Actor) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self
            .repository
            .find_by_event(actor.event_id())
            .await
            .inspect_err(log_store_failure)?)
    }

    /// Returns what the actor may do with a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for unknown tasks.
    pub async fn permissions(
        &self,
        actor: &Actor,
        task_id: TaskId,
    ) -> TaskLifecycleResult<TaskPermissions> {
        let task = self.find_task_or_error(task_id).await?;
        Ok(TaskPermissions::evaluate(&task, actor))
    }

    /// Assigns the task to the actor and marks it in progress.
    ///
    /// The store only accepts the claim while its copy is still unclaimed,
    /// so of two concurrent claims exactly one succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AlreadyClaimed`] when the task has an
    /// assignee, including one written concurrently.
    pub async fn claim(&self, actor: &Actor, task_id: TaskId) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        task.claim(actor, &*self.clock)
            .inspect_err(|err| log_rejection(task_id, actor, err))?;
        self.repository
            .claim(&task)
            .await
            .map_err(|err| match err {
                TaskRepositoryError::ClaimConflict(id) => {
                    tracing::warn!(
                        task_id = %id,
                        user = %actor.email(),
                        "claim lost to a concurrent claim"
                    );
                    TaskLifecycleError::Domain(TaskDomainError::AlreadyClaimed(id))
                }
                other => {
                    log_store_failure(&other);
                    TaskLifecycleError::Repository(other)
                }
            })?;
        tracing::info!(%task_id, assignee = %actor.email(), "task claimed");
        Ok(task)
    }

    /// Records the assignee's solution and completes the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::PermissionDenied`] unless the actor is the
    /// assignee, checked before the text is validated, then a validation
    /// error for blank text, blank file references or too many files.
    pub async fn submit_solution(
        &self,
        actor: &Actor,
        task_id: TaskId,
        request: SubmitSolutionRequest,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        Self::ensure_permitted(&task, actor, TaskAction::SubmitSolution)?;

        let max_files = self.config.max_solution_files;
        if request.files.len() > max_files {
            return Err(TaskDomainError::TooManySolutionFiles {
                max: max_files,
                actual: request.files.len(),
            }
            .into());
        }
        let solution = Solution::new(request.text, request.files)?;
        task.submit_solution(actor, solution, &*self.clock)?;
        self.persist_update(&task).await?;
        tracing::info!(%task_id, assignee = %actor.email(), "solution submitted");
        Ok(task)
    }

    /// Applies a metadata edit.
    ///
    /// Only the edited metadata is written back; a claim or solution stored
    /// since the task was loaded is kept.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::PermissionDenied`] unless the actor
    /// organizes the event, then a validation error for a blank or overlong
    /// name.
    pub async fn edit(
        &self,
        actor: &Actor,
        task_id: TaskId,
        request: EditTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        Self::ensure_permitted(&task, actor, TaskAction::Edit)?;
        let edit = request.into_edit(&self.config)?;
        if edit.is_empty() {
            return Ok(task);
        }
        task.apply_edit(actor, edit, &*self.clock)?;
        self.repository
            .update_details(&task)
            .await
            .inspect_err(log_store_failure)?;
        tracing::info!(%task_id, "task edited");
        Ok(task)
    }

    /// Sets the status manually.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::PermissionDenied`] unless the actor is the
    /// organizer or the assignee, and
    /// [`TaskDomainError::InvalidStatusTransition`] when the configured policy
    /// forbids the change.
    pub async fn update_status(
        &self,
        actor: &Actor,
        task_id: TaskId,
        status: TaskStatus,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        let previous = task.status();
        task.update_status(actor, status, self.config.transition_policy, &*self.clock)
            .inspect_err(|err| log_rejection(task_id, actor, err))?;
        self.persist_update(&task).await?;
        tracing::info!(%task_id, from = %previous, to = %status, "task status updated");
        Ok(task)
    }

    /// Sets the status from a stored or user-entered label.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidStatus`] for unknown labels, then
    /// the errors of [`Self::update_status`].
    pub async fn update_status_label(
        &self,
        actor: &Actor,
        task_id: TaskId,
        label: &str,
    ) -> TaskLifecycleResult<Task> {
        let status = TaskStatus::try_from(label)?;
        self.update_status(actor, task_id, status).await
    }

    /// Removes the assignee and any solution, returning the task to pending.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::PermissionDenied`] unless the actor is the
    /// organizer or the assignee, and [`TaskDomainError::NotClaimed`] when
    /// the task has no assignee.
    pub async fn release(&self, actor: &Actor, task_id: TaskId) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        task.release(actor, &*self.clock)
            .inspect_err(|err| log_rejection(task_id, actor, err))?;
        self.persist_update(&task).await?;
        tracing::info!(%task_id, "task released");
        Ok(task)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::PermissionDenied`] unless the actor
    /// organizes the event.
    pub async fn delete(&self, actor: &Actor, task_id: TaskId) -> TaskLifecycleResult<()> {
        let task = self.find_task_or_error(task_id).await?;
        Self::ensure_permitted(&task, actor, TaskAction::Delete)?;
        self.repository
            .delete(task_id)
            .await
            .inspect_err(log_store_failure)?;
        tracing::info!(%task_id, "task deleted");
        Ok(())
    }

    /// Computes progress statistics for the actor's event.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn summarize_event(&self, actor: &Actor) -> TaskLifecycleResult<TaskSummary> {
        let tasks = self.list_for_event(actor).await?;
        Ok(TaskSummary::from_tasks(&tasks, self.config.top_performers))
    }
}
