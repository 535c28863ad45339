//! Stage, priority and status labels, plus the status transition policy.
//!
//! Storage uses the snake_case forms returned by `as_str`. Parsing also
//! accepts title-case English labels and the Chinese labels written by
//! earlier clients, so records created before normalization still load.

use super::ParseTaskLabelError;
use serde::{Deserialize, Serialize};
use std::fmt;

fn normalize_label(value: &str) -> String {
    value
        .trim()
        .to_ascii_lowercase()
        .replace([' ', '-'], "_")
}

/// Planning phase a task belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStage {
    /// Work done before the event.
    #[default]
    Preparation,
    /// Work done while the event runs.
    Execution,
    /// Follow-up after the event.
    Review,
}

impl TaskStage {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preparation => "preparation",
            Self::Execution => "execution",
            Self::Review => "review",
        }
    }
}

impl TryFrom<&str> for TaskStage {
    type Error = ParseTaskLabelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match normalize_label(value).as_str() {
            "preparation" | "筹备阶段" => Ok(Self::Preparation),
            "execution" | "执行阶段" => Ok(Self::Execution),
            "review" | "复盘阶段" => Ok(Self::Review),
            _ => Err(ParseTaskLabelError::new("stage", value)),
        }
    }
}

impl fmt::Display for TaskStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task urgency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Normal urgency.
    #[default]
    Medium,
    /// Should be handled soon.
    High,
    /// Blocks the event.
    Urgent,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    /// Returns whether the priority counts as high in summaries.
    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High | Self::Urgent)
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskLabelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match normalize_label(value).as_str() {
            "low" | "低" => Ok(Self::Low),
            "medium" | "中" => Ok(Self::Medium),
            "high" | "高" => Ok(Self::High),
            "urgent" | "紧急" => Ok(Self::Urgent),
            _ => Err(ParseTaskLabelError::new("priority", value)),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task progress status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not started.
    #[default]
    Pending,
    /// Someone is working on the task.
    InProgress,
    /// The task is done.
    Completed,
    /// The task is behind schedule.
    Delayed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Delayed => "delayed",
        }
    }

    /// Returns whether a manual change to `target` is allowed under `policy`.
    ///
    /// Staying in the same status is always allowed.
    #[must_use]
    pub const fn can_transition_to(self, target: Self, policy: TransitionPolicy) -> bool {
        match policy {
            TransitionPolicy::Permissive => true,
            TransitionPolicy::Strict => {
                !matches!((self, target), (Self::Completed, Self::Pending | Self::Delayed))
            }
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskLabelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match normalize_label(value).as_str() {
            "pending" | "待开始" => Ok(Self::Pending),
            "in_progress" | "进行中" => Ok(Self::InProgress),
            "completed" | "已完成" => Ok(Self::Completed),
            "delayed" | "延期" => Ok(Self::Delayed),
            _ => Err(ParseTaskLabelError::new("status", value)),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule set applied to manual status updates.
///
/// Claiming and submitting set their target status directly and are not
/// subject to the policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Any status may follow any other.
    #[default]
    Permissive,
    /// Completed tasks may only be reopened to in progress.
    Strict,
}
