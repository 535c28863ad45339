//! Domain model for task lifecycle management.
//!
//! The task domain models task creation, claiming, solution submission,
//! metadata edits and status transitions, together with the permission rules
//! that decide who may perform each of them. Infrastructure concerns stay
//! outside of the domain boundary.

mod error;
mod ids;
mod labels;
mod permissions;
mod solution;
mod summary;
mod task;

pub use error::{ParseTaskLabelError, TaskDomainError};
pub use ids::{TaskId, TaskName};
pub use labels::{TaskPriority, TaskStage, TaskStatus, TransitionPolicy};
pub use permissions::{TaskAction, TaskPermissions};
pub use solution::{Assignee, Solution, SolutionFile};
pub use summary::{PerformerTally, TaskSummary};
pub use task::{PersistedTaskData, Task, TaskDraft, TaskEdit};
