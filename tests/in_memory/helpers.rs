//! Shared wiring for in-memory integration tests.

use std::sync::Arc;

use convene::event::{
    adapters::memory::InMemoryEventRepository,
    domain::{Actor, Event},
    services::{CreateEventRequest, EventAccessService},
};
use convene::identity::domain::UserIdentity;
use convene::planning::{adapters::memory::ScriptedAiClient, services::EventPlanningService};
use convene::task::{adapters::memory::InMemoryTaskRepository, services::TaskLifecycleService};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest::fixture;

/// Event service over the in-memory store.
pub type Events = EventAccessService<InMemoryEventRepository, DefaultClock>;

/// Task service over the in-memory store.
pub type Tasks = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Planning service over the in-memory stores and a scripted AI.
pub type Planner = EventPlanningService<
    InMemoryEventRepository,
    InMemoryTaskRepository,
    ScriptedAiClient,
    DefaultClock,
>;

/// All services of one application instance, sharing stores.
pub struct App {
    pub events: Events,
    pub tasks: Tasks,
    pub planner: Planner,
    pub ai: Arc<ScriptedAiClient>,
}

/// Provides a fresh application with empty stores.
#[fixture]
pub fn app() -> App {
    let clock = Arc::new(DefaultClock);
    let event_repository = Arc::new(InMemoryEventRepository::new());
    let task_repository = Arc::new(InMemoryTaskRepository::new());
    let ai = Arc::new(ScriptedAiClient::new());
    let planner = EventPlanningService::new(
        EventAccessService::new(Arc::clone(&event_repository), Arc::clone(&clock)),
        TaskLifecycleService::new(Arc::clone(&task_repository), Arc::clone(&clock)),
        Arc::clone(&ai),
        Arc::clone(&clock),
    );
    App {
        events: EventAccessService::new(event_repository, Arc::clone(&clock)),
        tasks: TaskLifecycleService::new(task_repository, clock),
        planner,
        ai,
    }
}

/// Builds an identity from literal test data.
///
/// # Errors
///
/// Returns an error if the email is malformed.
pub fn identity(name: &str, email: &str) -> Result<UserIdentity, eyre::Report> {
    UserIdentity::parse(name, email).wrap_err_with(|| format!("identity for {email}"))
}

/// An event with organizer `O` and joined participants `P1`, `P2`.
pub struct Roster {
    pub event: Event,
    pub organizer: Actor,
    pub first: Actor,
    pub second: Actor,
}

/// Creates an event organized by Olivia and joined by Pia and Quinn.
///
/// # Errors
///
/// Returns an error if any event operation fails.
pub async fn roster(app: &App, title: &str) -> Result<Roster, eyre::Report> {
    let olivia = identity("Olivia", "olivia@example.com")?;
    let pia = identity("Pia", "pia@example.com")?;
    let quinn = identity("Quinn", "quinn@example.com")?;

    let event = app
        .events
        .create_event(&olivia, CreateEventRequest::new(title))
        .await
        .wrap_err("create event")?;
    for participant in [&pia, &quinn] {
        app.events
            .join(event.id(), participant)
            .await
            .wrap_err("join event")?;
    }

    Ok(Roster {
        organizer: app.events.resolve_actor(event.id(), &olivia).await?,
        first: app.events.resolve_actor(event.id(), &pia).await?,
        second: app.events.resolve_actor(event.id(), &quinn).await?,
        event,
    })
}
