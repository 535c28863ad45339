//! Aggregate statistics over an event's tasks.

use super::{Task, TaskStatus};
use crate::identity::domain::EmailAddress;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Completed-task count for one assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformerTally {
    /// Assignee display name, taken from the first completed task seen.
    pub name: String,
    /// Assignee email.
    pub email: EmailAddress,
    /// Number of completed tasks assigned to this user.
    pub completed_tasks: usize,
}

/// Progress statistics for a set of tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    /// Number of tasks.
    pub total: usize,
    /// Tasks with status completed.
    pub completed: usize,
    /// Tasks with status delayed.
    pub delayed: usize,
    /// Tasks with high or urgent priority.
    pub high_priority: usize,
    /// Completed share in percent, rounded half up. Zero when there are no
    /// tasks.
    pub completion_percent: u8,
    /// Assignees with the most completed tasks, best first.
    pub top_performers: Vec<PerformerTally>,
}

impl TaskSummary {
    /// Computes statistics for `tasks`, keeping at most `top_performers`
    /// entries in the ranking.
    #[must_use]
    pub fn from_tasks<'a>(
        tasks: impl IntoIterator<Item = &'a Task>,
        top_performers: usize,
    ) -> Self {
        let mut summary = Self::default();
        let mut tallies: BTreeMap<EmailAddress, PerformerTally> = BTreeMap::new();

        for task in tasks {
            summary.total += 1;
            if task.priority().is_high() {
                summary.high_priority += 1;
            }
            match task.status() {
                TaskStatus::Completed => {
                    summary.completed += 1;
                    if let Some(assignee) = task.assignee() {
                        tallies
                            .entry(assignee.email().clone())
                            .or_insert_with(|| PerformerTally {
                                name: assignee.name().to_owned(),
                                email: assignee.email().clone(),
                                completed_tasks: 0,
                            })
                            .completed_tasks += 1;
                    }
                }
                TaskStatus::Delayed => summary.delayed += 1,
                TaskStatus::Pending | TaskStatus::InProgress => {}
            }
        }

        summary.completion_percent = completion_percent(summary.completed, summary.total);

        // BTreeMap iteration is ordered by email, and the sort is stable.
        let mut ranking: Vec<PerformerTally> = tallies.into_values().collect();
        ranking.sort_by(|left, right| right.completed_tasks.cmp(&left.completed_tasks));
        ranking.truncate(top_performers);
        summary.top_performers = ranking;
        summary
    }
}

fn completion_percent(completed: usize, total: usize) -> u8 {
    let doubled_total = total.saturating_mul(2);
    let rounded = completed
        .saturating_mul(200)
        .saturating_add(total)
        .checked_div(doubled_total)
        .unwrap_or(0);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}
