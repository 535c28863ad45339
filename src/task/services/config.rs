//! Tunable limits and policies for the task lifecycle service.

use crate::task::domain::TransitionPolicy;
use serde::{Deserialize, Serialize};

/// Configuration for [`super::TaskLifecycleService`].
///
/// Missing fields fall back to [`LifecycleConfig::default`] when
/// deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Rules applied to manual status updates.
    pub transition_policy: TransitionPolicy,
    /// Maximum number of files attached to one solution.
    pub max_solution_files: usize,
    /// Maximum task name length in characters.
    pub max_task_name_chars: usize,
    /// Number of assignees listed in task summaries.
    pub top_performers: usize,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self::permissive()
    }
}

impl LifecycleConfig {
    /// Creates the default configuration: any status may follow any other.
    #[must_use]
    pub const fn permissive() -> Self {
        Self {
            transition_policy: TransitionPolicy::Permissive,
            max_solution_files: 20,
            max_task_name_chars: 200,
            top_performers: 3,
        }
    }

    /// Creates a strict configuration with guarded transitions and reduced
    /// limits.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            transition_policy: TransitionPolicy::Strict,
            max_solution_files: 10,
            max_task_name_chars: 100,
            top_performers: 3,
        }
    }
}
