//! When steps for task claim workflow BDD scenarios.

use super::world::{TaskClaimWorld, run_async};
use convene::task::services::SubmitSolutionRequest;
use rstest_bdd_macros::when;

#[when(r#""{email}" claims the task"#)]
fn user_claims_task(world: &mut TaskClaimWorld, email: String) -> Result<(), eyre::Report> {
    let actor = world.actor(&email)?;
    let task_id = world.task()?.id();
    let result = run_async(world.tasks.claim(&actor, task_id));
    world.record(result);
    Ok(())
}

#[when(r#""{email}" submits the solution "{text}""#)]
fn user_submits_solution(
    world: &mut TaskClaimWorld,
    email: String,
    text: String,
) -> Result<(), eyre::Report> {
    let actor = world.actor(&email)?;
    let task_id = world.task()?.id();
    let result = run_async(world.tasks.submit_solution(
        &actor,
        task_id,
        SubmitSolutionRequest::new(text),
    ));
    world.record(result);
    Ok(())
}

#[when(r#"the organizer sets the status to "{status}""#)]
fn organizer_sets_status(world: &mut TaskClaimWorld, status: String) -> Result<(), eyre::Report> {
    let organizer = world.organizer()?.clone();
    let task_id = world.task()?.id();
    let result = run_async(
        world
            .tasks
            .update_status_label(&organizer, task_id, &status),
    );
    world.record(result);
    Ok(())
}

#[when(r#""{email}" sets the status to "{status}""#)]
fn user_sets_status(
    world: &mut TaskClaimWorld,
    email: String,
    status: String,
) -> Result<(), eyre::Report> {
    let actor = world.actor(&email)?;
    let task_id = world.task()?.id();
    let result = run_async(world.tasks.update_status_label(&actor, task_id, &status));
    world.record(result);
    Ok(())
}
