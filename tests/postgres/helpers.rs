//! Shared test helpers for `PostgreSQL` integration tests.

use convene::event::domain::{Actor, ActorRole, EventId};
use convene::identity::domain::UserIdentity;
use convene::task::adapters::postgres::{PostgresTaskRepository, TaskPgPool};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::fixture;
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Boxed error type used by database helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// SQL creating the task table.
pub const CREATE_TASKS_SQL: &str =
    include_str!("../../migrations/2026-10-16-000000_create_tasks/up.sql");

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "convene_test_template";

/// Creates a tokio runtime for async repository calls in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be built.
pub fn test_runtime() -> Result<Runtime, BoxError> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

/// Ensures the template database exists with the task table applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: &TestCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(CREATE_TASKS_SQL)
                .map_err(|e| eyre::eyre!("failed to create task table: {e}"))?;
            Ok(())
        })
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(())
}

/// Drops the test database when the test ends, even if it panics.
pub struct CleanupGuard {
    cluster: &'static TestCluster,
    db_name: String,
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if let Err(err) = self.cluster.drop_database(self.db_name.as_str()) {
            tracing::warn!(database = %self.db_name, error = %err, "failed to drop test database");
        }
    }
}

/// Repository bound to a database cloned from the template.
///
/// Fields drop in order, so the pool closes before the database is dropped.
pub struct RepositoryContext {
    pub repository: PostgresTaskRepository,
    pub runtime: Runtime,
    _guard: CleanupGuard,
}

/// Creates a fresh database from the template and wires a repository to it.
///
/// # Errors
///
/// Returns an error if template setup, database creation or pool
/// construction fails.
#[fixture]
pub fn context(
    shared_test_cluster: &'static TestCluster,
) -> Result<RepositoryContext, BoxError> {
    ensure_template(shared_test_cluster)?;
    let db_name = format!("convene_test_{}", Uuid::new_v4().simple());
    shared_test_cluster
        .create_database_from_template(db_name.as_str(), TEMPLATE_DB)
        .map_err(|e| Box::new(e) as BoxError)?;
    let guard = CleanupGuard {
        cluster: shared_test_cluster,
        db_name,
    };

    let url = shared_test_cluster.connection().database_url(&guard.db_name);
    let manager = ConnectionManager::<PgConnection>::new(url);
    let pool: TaskPgPool = Pool::builder().max_size(1).build(manager)?;
    Ok(RepositoryContext {
        repository: PostgresTaskRepository::new(pool),
        runtime: test_runtime()?,
        _guard: guard,
    })
}

/// Builds an actor for `email` in `event_id`.
///
/// # Errors
///
/// Returns an error if the email is malformed.
pub fn actor(email: &str, event_id: EventId, role: ActorRole) -> Result<Actor, BoxError> {
    let identity = UserIdentity::parse("", email)?;
    Ok(Actor::new(identity, event_id, role))
}
