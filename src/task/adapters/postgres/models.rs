//! Diesel row models for task persistence.

use super::schema::tasks;
use crate::task::domain::Task;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owning event identifier.
    pub event_id: uuid::Uuid,
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Stage label.
    pub stage: String,
    /// Priority label.
    pub priority: String,
    /// Status label.
    pub status: String,
    /// Assignee display name.
    pub assignee_name: Option<String>,
    /// Assignee email.
    pub assignee_email: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Submitted solution text.
    pub solution_text: Option<String>,
    /// Submitted solution file references.
    pub solution_files: Value,
    /// Claim timestamp.
    pub claimed_at: Option<DateTime<Utc>>,
    /// Submission timestamp.
    pub submitted_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owning event identifier.
    pub event_id: uuid::Uuid,
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Stage label.
    pub stage: String,
    /// Priority label.
    pub priority: String,
    /// Status label.
    pub status: String,
    /// Assignee display name.
    pub assignee_name: Option<String>,
    /// Assignee email.
    pub assignee_email: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Submitted solution text.
    pub solution_text: Option<String>,
    /// Submitted solution file references.
    pub solution_files: Value,
    /// Claim timestamp.
    pub claimed_at: Option<DateTime<Utc>>,
    /// Submission timestamp.
    pub submitted_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Update model for mutable task columns.
///
/// `None` writes `NULL`, so releasing a task clears its assignee columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Stage label.
    pub stage: String,
    /// Priority label.
    pub priority: String,
    /// Status label.
    pub status: String,
    /// Assignee display name.
    pub assignee_name: Option<String>,
    /// Assignee email.
    pub assignee_email: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Submitted solution text.
    pub solution_text: Option<String>,
    /// Submitted solution file references.
    pub solution_files: Value,
    /// Claim timestamp.
    pub claimed_at: Option<DateTime<Utc>>,
    /// Submission timestamp.
    pub submitted_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<NewTaskRow> for TaskChangeset {
    fn from(row: NewTaskRow) -> Self {
        Self {
            name: row.name,
            description: row.description,
            stage: row.stage,
            priority: row.priority,
            status: row.status,
            assignee_name: row.assignee_name,
            assignee_email: row.assignee_email,
            due_date: row.due_date,
            solution_text: row.solution_text,
            solution_files: row.solution_files,
            claimed_at: row.claimed_at,
            submitted_at: row.submitted_at,
            updated_at: row.updated_at,
        }
    }
}

/// Update model for the metadata columns an edit may change.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskDetailsChangeset {
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Stage label.
    pub stage: String,
    /// Priority label.
    pub priority: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskDetailsChangeset {
    fn from(task: &Task) -> Self {
        Self {
            name: task.name().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            stage: task.stage().as_str().to_owned(),
            priority: task.priority().as_str().to_owned(),
            due_date: task.due_date(),
            updated_at: task.updated_at(),
        }
    }
}
