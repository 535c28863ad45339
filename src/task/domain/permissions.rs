//! Who may do what to a task.

use super::Task;
use crate::event::domain::Actor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operations guarded by task permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskAction {
    /// Create a task for an event.
    Create,
    /// Assign oneself to an unclaimed task.
    Claim,
    /// Submit a solution for an assigned task.
    SubmitSolution,
    /// Change name, description, stage, priority or due date.
    Edit,
    /// Manually change the status.
    UpdateStatus,
    /// Remove the current assignee.
    Release,
    /// Delete the task.
    Delete,
}

impl TaskAction {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Claim => "claim",
            Self::SubmitSolution => "submit a solution for",
            Self::Edit => "edit",
            Self::UpdateStatus => "update the status of",
            Self::Release => "release",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of what an actor may do with one task.
///
/// Views use this to decide which controls to show; services re-check the
/// same rules before every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "one flag per guarded operation mirrors the permission table"
)]
pub struct TaskPermissions {
    /// Whether the actor may claim the task.
    pub claim: bool,
    /// Whether the actor may submit a solution.
    pub submit_solution: bool,
    /// Whether the actor may edit task metadata.
    pub edit: bool,
    /// Whether the actor may change the status manually.
    pub update_status: bool,
    /// Whether the actor may delete the task.
    pub delete: bool,
}

impl TaskPermissions {
    /// Evaluates every permission for `actor` on `task`.
    #[must_use]
    pub fn evaluate(task: &Task, actor: &Actor) -> Self {
        Self {
            claim: task.can_claim(actor),
            submit_solution: task.can_submit_solution(actor),
            edit: task.can_edit(actor),
            update_status: task.can_update_status(actor),
            delete: task.can_delete(actor),
        }
    }
}

impl Task {
    fn shares_event_with(&self, actor: &Actor) -> bool {
        self.event_id() == actor.event_id()
    }

    /// Returns whether `actor` is the task's assignee.
    #[must_use]
    pub fn is_assigned_to(&self, actor: &Actor) -> bool {
        self.assignee()
            .is_some_and(|assignee| assignee.email() == actor.email())
    }

    /// Any user with access to the event may claim an unclaimed task,
    /// organizers included.
    #[must_use]
    pub fn can_claim(&self, actor: &Actor) -> bool {
        self.shares_event_with(actor) && !self.is_claimed()
    }

    /// Only the assignee may submit a solution.
    #[must_use]
    pub fn can_submit_solution(&self, actor: &Actor) -> bool {
        self.shares_event_with(actor) && self.is_assigned_to(actor)
    }

    /// Only the organizer may edit task metadata.
    #[must_use]
    pub fn can_edit(&self, actor: &Actor) -> bool {
        actor.organizes(self.event_id())
    }

    /// The organizer and the assignee may change the status manually.
    #[must_use]
    pub fn can_update_status(&self, actor: &Actor) -> bool {
        actor.organizes(self.event_id())
            || (self.shares_event_with(actor) && self.is_assigned_to(actor))
    }

    /// Only the organizer may delete a task.
    #[must_use]
    pub fn can_delete(&self, actor: &Actor) -> bool {
        actor.organizes(self.event_id())
    }

    /// Returns whether `actor` may perform `action` on this task.
    ///
    /// [`TaskAction::Create`] is never granted here; creation is checked
    /// against the event in [`Task::create`].
    #[must_use]
    pub fn permits(&self, actor: &Actor, action: TaskAction) -> bool {
        match action {
            TaskAction::Create => false,
            TaskAction::Claim => self.can_claim(actor),
            TaskAction::SubmitSolution => self.can_submit_solution(actor),
            TaskAction::Edit => self.can_edit(actor),
            TaskAction::UpdateStatus | TaskAction::Release => self.can_update_status(actor),
            TaskAction::Delete => self.can_delete(actor),
        }
    }
}
