//! Given steps for task claim workflow BDD scenarios.

use super::world::{TaskClaimWorld, identity, run_async};
use convene::event::services::CreateEventRequest;
use convene::task::services::CreateTaskRequest;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"an event organized by "{email}""#)]
fn event_organized_by(world: &mut TaskClaimWorld, email: String) -> Result<(), eyre::Report> {
    let organizer = identity(&email)?;
    let event = run_async(
        world
            .events
            .create_event(&organizer, CreateEventRequest::new("Scenario event")),
    )
    .wrap_err("create scenario event")?;
    world.event_id = Some(event.id());
    world.organizer = Some(world.actor(&email)?);
    Ok(())
}

#[given(r#""{email}" has joined the event"#)]
fn participant_joined(world: &mut TaskClaimWorld, email: String) -> Result<(), eyre::Report> {
    let event_id = world.event_id()?;
    let participant = identity(&email)?;
    run_async(world.events.join(event_id, &participant)).wrap_err("join scenario event")?;
    Ok(())
}

#[given(r#"the organizer created the task "{name}""#)]
fn organizer_created_task(world: &mut TaskClaimWorld, name: String) -> Result<(), eyre::Report> {
    let organizer = world.organizer()?.clone();
    let task = run_async(
        world
            .tasks
            .create_task(&organizer, CreateTaskRequest::new(name)),
    )
    .wrap_err("create scenario task")?;
    world.current_task = Some(task);
    Ok(())
}

#[given(r#""{email}" has claimed the task"#)]
fn participant_has_claimed(world: &mut TaskClaimWorld, email: String) -> Result<(), eyre::Report> {
    let actor = world.actor(&email)?;
    let task_id = world.task()?.id();
    let claimed = run_async(world.tasks.claim(&actor, task_id)).wrap_err("claim in setup")?;
    world.current_task = Some(claimed);
    Ok(())
}
