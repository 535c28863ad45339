//! `PostgreSQL` integration tests for conditional claims.

use std::sync::Arc;

use convene::event::domain::{ActorRole, EventId};
use convene::task::{
    domain::{Task, TaskDraft, TaskEdit, TaskName, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
    services::{CreateTaskRequest, TaskErrorCategory, TaskLifecycleService},
};
use mockable::DefaultClock;
use rstest::rstest;

use crate::postgres::helpers::{BoxError, RepositoryContext, actor, context};

#[rstest]
fn stale_claim_loses_to_stored_claim(
    context: Result<RepositoryContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context?;
    let event_id = EventId::new();
    let organizer = actor("olivia@example.com", event_id, ActorRole::Organizer)?;
    let first = actor("pia@example.com", event_id, ActorRole::Participant)?;
    let second = actor("quinn@example.com", event_id, ActorRole::Participant)?;
    let task = Task::create(
        &organizer,
        TaskDraft::new(TaskName::new("Rent chairs")?),
        &DefaultClock,
    )?;
    let mut winner = task.clone();
    let mut loser = task.clone();
    winner.claim(&first, &DefaultClock)?;
    loser.claim(&second, &DefaultClock)?;

    ctx.runtime.block_on(async {
        ctx.repository.store(&task).await?;
        ctx.repository.claim(&winner).await?;
        let result = ctx.repository.claim(&loser).await;

        assert!(matches!(result, Err(TaskRepositoryError::ClaimConflict(id)) if id == task.id()));
        let stored = ctx
            .repository
            .find_by_id(task.id())
            .await?
            .ok_or("task should exist")?;
        assert_eq!(stored.assignee(), winner.assignee());
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn claiming_missing_task_is_not_found(
    context: Result<RepositoryContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context?;
    let event_id = EventId::new();
    let organizer = actor("olivia@example.com", event_id, ActorRole::Organizer)?;
    let participant = actor("pia@example.com", event_id, ActorRole::Participant)?;
    let mut task = Task::create(
        &organizer,
        TaskDraft::new(TaskName::new("Never stored")?),
        &DefaultClock,
    )?;
    task.claim(&participant, &DefaultClock)?;

    let result = ctx.runtime.block_on(ctx.repository.claim(&task));

    assert!(matches!(result, Err(TaskRepositoryError::NotFound(_))));
    Ok(())
}

#[rstest]
fn details_update_keeps_claim_stored_after_load(
    context: Result<RepositoryContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context?;
    let event_id = EventId::new();
    let organizer = actor("olivia@example.com", event_id, ActorRole::Organizer)?;
    let participant = actor("pia@example.com", event_id, ActorRole::Participant)?;
    let task = Task::create(
        &organizer,
        TaskDraft::new(TaskName::new("Print menus")?),
        &DefaultClock,
    )?;
    let mut edited = task.clone();
    edited.apply_edit(
        &organizer,
        TaskEdit {
            name: Some(TaskName::new("Print place cards")?),
            description: Some(Some("Two per table".to_owned())),
            ..TaskEdit::default()
        },
        &DefaultClock,
    )?;
    let mut claimed = task.clone();
    claimed.claim(&participant, &DefaultClock)?;
    let missing = Task::create(
        &organizer,
        TaskDraft::new(TaskName::new("Never stored")?),
        &DefaultClock,
    )?;

    ctx.runtime.block_on(async {
        ctx.repository.store(&task).await?;
        ctx.repository.claim(&claimed).await?;
        ctx.repository.update_details(&edited).await?;

        let stored = ctx
            .repository
            .find_by_id(task.id())
            .await?
            .ok_or("task should exist")?;
        assert_eq!(stored.name().as_str(), "Print place cards");
        assert_eq!(stored.description(), Some("Two per table"));
        assert_eq!(stored.status(), TaskStatus::InProgress);
        assert_eq!(stored.assignee(), claimed.assignee());
        assert!(matches!(
            ctx.repository.update_details(&missing).await,
            Err(TaskRepositoryError::NotFound(_))
        ));
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn service_reports_second_claim_as_already_claimed(
    context: Result<RepositoryContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context?;
    let event_id = EventId::new();
    let organizer = actor("olivia@example.com", event_id, ActorRole::Organizer)?;
    let first = actor("pia@example.com", event_id, ActorRole::Participant)?;
    let second = actor("quinn@example.com", event_id, ActorRole::Participant)?;
    let service = TaskLifecycleService::new(Arc::new(ctx.repository), Arc::new(DefaultClock));

    ctx.runtime.block_on(async {
        let task = service
            .create_task(&organizer, CreateTaskRequest::new("Book band"))
            .await?;

        service.claim(&first, task.id()).await?;
        let result = service.claim(&second, task.id()).await;

        assert!(matches!(&result, Err(err) if err.category() == TaskErrorCategory::AlreadyClaimed));
        Ok::<(), BoxError>(())
    })
}
