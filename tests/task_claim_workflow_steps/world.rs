//! Shared world state for task claim workflow BDD scenarios.

use std::sync::Arc;

use convene::event::{
    adapters::memory::InMemoryEventRepository,
    domain::{Actor, EventId},
    services::EventAccessService,
};
use convene::identity::domain::UserIdentity;
use convene::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{TaskLifecycleError, TaskLifecycleService},
};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest::fixture;

/// Scenario world for task claim behaviour tests.
pub struct TaskClaimWorld {
    pub events: EventAccessService<InMemoryEventRepository, DefaultClock>,
    pub tasks: TaskLifecycleService<InMemoryTaskRepository, DefaultClock>,
    pub event_id: Option<EventId>,
    pub organizer: Option<Actor>,
    pub current_task: Option<Task>,
    pub last_result: Option<Result<Task, TaskLifecycleError>>,
}

impl TaskClaimWorld {
    /// Creates a world with empty stores.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        Self {
            events: EventAccessService::new(
                Arc::new(InMemoryEventRepository::new()),
                Arc::clone(&clock),
            ),
            tasks: TaskLifecycleService::new(Arc::new(InMemoryTaskRepository::new()), clock),
            event_id: None,
            organizer: None,
            current_task: None,
            last_result: None,
        }
    }

    /// Returns the scenario's event.
    ///
    /// # Errors
    ///
    /// Returns an error if no event was created yet.
    pub fn event_id(&self) -> Result<EventId, eyre::Report> {
        self.event_id
            .ok_or_else(|| eyre::eyre!("missing event in scenario world"))
    }

    /// Returns the scenario's organizer.
    ///
    /// # Errors
    ///
    /// Returns an error if no event was created yet.
    pub fn organizer(&self) -> Result<&Actor, eyre::Report> {
        self.organizer
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing organizer in scenario world"))
    }

    /// Returns the task under test.
    ///
    /// # Errors
    ///
    /// Returns an error if no task was created yet.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.current_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Resolves the actor for `email` in the scenario's event.
    ///
    /// # Errors
    ///
    /// Returns an error if the user has no access to the event.
    pub fn actor(&self, email: &str) -> Result<Actor, eyre::Report> {
        let event_id = self.event_id()?;
        let user = identity(email)?;
        run_async(self.events.resolve_actor(event_id, &user))
            .wrap_err_with(|| format!("resolve {email} in scenario event"))
    }

    /// Records an operation result, keeping the latest task state.
    pub fn record(&mut self, result: Result<Task, TaskLifecycleError>) {
        if let Ok(ref updated) = result {
            self.current_task = Some(updated.clone());
        }
        self.last_result = Some(result);
    }
}

impl Default for TaskClaimWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds an identity named after the email's local part.
///
/// # Errors
///
/// Returns an error if the email is malformed.
pub fn identity(email: &str) -> Result<UserIdentity, eyre::Report> {
    UserIdentity::parse("", email).wrap_err_with(|| format!("identity for {email}"))
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskClaimWorld {
    TaskClaimWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
