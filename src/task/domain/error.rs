//! Error types for task domain validation and parsing.

use super::{TaskAction, TaskId, TaskStatus};
use crate::event::domain::EventId;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// The task name exceeds the configured length.
    #[error("task name is {actual} characters long, maximum is {max}")]
    TaskNameTooLong {
        /// Configured maximum length in characters.
        max: usize,
        /// Length of the rejected name.
        actual: usize,
    },

    /// The solution text is empty after trimming.
    #[error("solution text must not be empty")]
    EmptySolutionText,

    /// A solution file reference is blank.
    #[error("solution file reference must not be empty")]
    EmptySolutionFile,

    /// More solution files were attached than allowed.
    #[error("{actual} solution files attached, maximum is {max}")]
    TooManySolutionFiles {
        /// Configured maximum number of files.
        max: usize,
        /// Number of files in the rejected submission.
        actual: usize,
    },

    /// The acting user may not perform the action on the task.
    #[error("not permitted to {action} task {task_id}")]
    PermissionDenied {
        /// Task the action targeted.
        task_id: TaskId,
        /// Rejected action.
        action: TaskAction,
    },

    /// The acting user may not create tasks for the event.
    #[error("not permitted to create tasks for event {0}")]
    CreateDenied(EventId),

    /// The task already has an assignee.
    #[error("task {0} is already claimed")]
    AlreadyClaimed(TaskId),

    /// The task has no assignee to release.
    #[error("task {0} is not claimed")]
    NotClaimed(TaskId),

    /// The configured transition policy forbids the status change.
    #[error("task {task_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// Task whose status was being changed.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },
}

/// Error returned while parsing stage, priority or status labels.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task {field}: {value}")]
pub struct ParseTaskLabelError {
    /// Name of the label family (`stage`, `priority` or `status`).
    pub field: &'static str,
    /// Rejected input.
    pub value: String,
}

impl ParseTaskLabelError {
    pub(crate) fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_owned(),
        }
    }
}
