//! Repository port for task persistence and lookup.

use crate::event::domain::EventId;
use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Stores several new tasks in one call. Either all tasks are stored or
    /// none are.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when any task ID already
    /// exists.
    async fn store_all(&self, tasks: &[Task]) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists edited metadata only: name, description, stage, priority,
    /// due date and the update timestamp. Assignee, solution and status
    /// columns keep their stored values, so a claim written after `task`
    /// was loaded survives the edit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update_details(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists a freshly claimed task, but only if the stored copy is still
    /// unclaimed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::ClaimConflict`] when another user
    /// claimed the task first and [`TaskRepositoryError::NotFound`] when the
    /// task does not exist.
    async fn claim(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all tasks of an event, oldest first.
    async fn find_by_event(&self, event_id: EventId) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The stored task was claimed by someone else in the meantime.
    #[error("task was claimed concurrently: {0}")]
    ClaimConflict(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
