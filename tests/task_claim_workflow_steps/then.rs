//! Then steps for task claim workflow BDD scenarios.

use super::world::TaskClaimWorld;
use convene::task::{domain::TaskStatus, services::TaskErrorCategory};
use rstest_bdd_macros::then;

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskClaimWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = world.task()?;

    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            task.status().as_str()
        ));
    }
    Ok(())
}

#[then(r#"the task is assigned to "{email}""#)]
fn task_is_assigned_to(world: &TaskClaimWorld, email: String) -> Result<(), eyre::Report> {
    let assignee = world
        .task()?
        .assignee()
        .ok_or_else(|| eyre::eyre!("task has no assignee"))?;

    if assignee.email().as_str() != email {
        return Err(eyre::eyre!(
            "expected assignee {email}, found {}",
            assignee.email()
        ));
    }
    Ok(())
}

#[then(r#"the operation fails as "{category}""#)]
fn operation_fails_as(world: &TaskClaimWorld, category: String) -> Result<(), eyre::Report> {
    let expected = match category.as_str() {
        "validation" => TaskErrorCategory::Validation,
        "permission denied" => TaskErrorCategory::PermissionDenied,
        "already claimed" => TaskErrorCategory::AlreadyClaimed,
        "not found" => TaskErrorCategory::NotFound,
        other => return Err(eyre::eyre!("unknown error category in scenario: {other}")),
    };
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result"))?;

    match result {
        Err(err) if err.category() == expected => Ok(()),
        other => Err(eyre::eyre!("expected {category} failure, got {other:?}")),
    }
}
