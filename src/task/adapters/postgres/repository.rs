//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskDetailsChangeset, TaskRow},
    schema::tasks,
};
use crate::event::domain::EventId;
use crate::identity::domain::EmailAddress;
use crate::task::{
    domain::{
        Assignee, PersistedTaskData, Solution, SolutionFile, Task, TaskId, TaskName,
        TaskPriority, TaskStage, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

/// Stored row that cannot be turned back into a task.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum RowDecodeError {
    /// Only one of the assignee columns is set.
    #[error("task {0} has a partial assignee")]
    PartialAssignee(uuid::Uuid),
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| map_insert_error(err, task_id))?;
            Ok(())
        })
        .await
    }

    async fn store_all(&self, tasks_to_store: &[Task]) -> TaskRepositoryResult<()> {
        let Some(first_id) = tasks_to_store.first().map(Task::id) else {
            return Ok(());
        };
        let rows = tasks_to_store
            .iter()
            .map(to_new_row)
            .collect::<TaskRepositoryResult<Vec<_>>>()?;

        // A multi-row INSERT is a single statement, so it is atomic.
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&rows)
                .execute(connection)
                .map_err(|err| map_insert_error(err, first_id))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = TaskChangeset::from(to_new_row(task)?);

        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn update_details(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = TaskDetailsChangeset::from(task);

        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn claim(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = TaskChangeset::from(to_new_row(task)?);

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(task_id.into_inner()))
                    .filter(tasks::assignee_email.is_null()),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;
            if updated > 0 {
                return Ok(());
            }

            let exists = diesel::select(diesel::dsl::exists(
                tasks::table.filter(tasks::id.eq(task_id.into_inner())),
            ))
            .get_result::<bool>(connection)
            .map_err(TaskRepositoryError::persistence)?;
            if exists {
                Err(TaskRepositoryError::ClaimConflict(task_id))
            } else {
                Err(TaskRepositoryError::NotFound(task_id))
            }
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_event(&self, event_id: EventId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            tasks::table
                .filter(tasks::event_id.eq(event_id.into_inner()))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }
}

fn map_insert_error(err: DieselError, task_id: TaskId) -> TaskRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            TaskRepositoryError::DuplicateTask(task_id)
        }
        other => TaskRepositoryError::persistence(other),
    }
}

pub(crate) fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let files: Vec<&str> = task
        .solution()
        .map(|solution| solution.files().iter().map(SolutionFile::as_str).collect())
        .unwrap_or_default();
    let solution_files = serde_json::to_value(files).map_err(TaskRepositoryError::persistence)?;

    Ok(NewTaskRow {
        id: task.id().into_inner(),
        event_id: task.event_id().into_inner(),
        name: task.name().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        stage: task.stage().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        assignee_name: task.assignee().map(|assignee| assignee.name().to_owned()),
        assignee_email: task
            .assignee()
            .map(|assignee| assignee.email().as_str().to_owned()),
        due_date: task.due_date(),
        solution_text: task.solution().map(|solution| solution.text().to_owned()),
        solution_files,
        claimed_at: task.claimed_at(),
        submitted_at: task.submitted_at(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

pub(crate) fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        event_id,
        name,
        description,
        stage,
        priority,
        status,
        assignee_name,
        assignee_email,
        due_date,
        solution_text,
        solution_files,
        claimed_at,
        submitted_at,
        created_at,
        updated_at,
    } = row;

    let assignee = match (assignee_name, assignee_email) {
        (Some(display_name), Some(email)) => Some(Assignee::new(
            display_name,
            EmailAddress::new(email).map_err(TaskRepositoryError::persistence)?,
        )),
        (None, None) => None,
        _ => {
            return Err(TaskRepositoryError::persistence(
                RowDecodeError::PartialAssignee(id),
            ));
        }
    };
    let solution = solution_text
        .map(|text| {
            let files = serde_json::from_value::<Vec<String>>(solution_files)
                .map_err(TaskRepositoryError::persistence)?;
            Solution::new(text, files).map_err(TaskRepositoryError::persistence)
        })
        .transpose()?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        event_id: EventId::from_uuid(event_id),
        name: TaskName::new(name).map_err(TaskRepositoryError::persistence)?,
        description,
        stage: TaskStage::try_from(stage.as_str()).map_err(TaskRepositoryError::persistence)?,
        priority: TaskPriority::try_from(priority.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?,
        assignee,
        due_date,
        solution,
        claimed_at,
        submitted_at,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
