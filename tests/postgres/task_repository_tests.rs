//! `PostgreSQL` integration tests for task persistence.

use convene::event::domain::{Actor, ActorRole, EventId};
use convene::identity::domain::UserIdentity;
use convene::task::{
    domain::{Solution, Task, TaskDraft, TaskName, TaskPriority, TaskStatus, TransitionPolicy},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::DefaultClock;
use rstest::rstest;

use crate::postgres::helpers::{BoxError, RepositoryContext, actor, context};

fn new_task(event_id: EventId, name: &str) -> Result<Task, BoxError> {
    let organizer = actor("olivia@example.com", event_id, ActorRole::Organizer)?;
    let draft = TaskDraft::new(TaskName::new(name)?);
    Ok(Task::create(&organizer, draft, &DefaultClock)?)
}

#[rstest]
fn stored_task_round_trips(context: Result<RepositoryContext, BoxError>) -> Result<(), BoxError> {
    let ctx = context?;
    let event_id = EventId::new();
    let mut task = new_task(event_id, "Order catering")?;
    let participant = actor("pia@example.com", event_id, ActorRole::Participant)?;

    ctx.runtime.block_on(async {
        ctx.repository.store(&task).await?;
        task.claim(&participant, &DefaultClock)?;
        ctx.repository.claim(&task).await?;
        let solution = Solution::new(
            "Caterer confirmed",
            ["https://files.example.com/menu.pdf".to_owned()],
        )?;
        task.submit_solution(&participant, solution, &DefaultClock)?;
        ctx.repository.update(&task).await?;

        let found = ctx
            .repository
            .find_by_id(task.id())
            .await?
            .ok_or("stored task should be found")?;
        assert_eq!(found.status(), TaskStatus::Completed);
        assert_eq!(found.assignee(), task.assignee());
        assert_eq!(found.solution(), task.solution());
        assert_eq!(found.name(), task.name());
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn tasks_are_listed_per_event_in_creation_order(
    context: Result<RepositoryContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context?;
    let event_id = EventId::new();
    let batch = vec![new_task(event_id, "First")?, new_task(event_id, "Second")?];
    let elsewhere = new_task(EventId::new(), "Elsewhere")?;

    let listed = ctx.runtime.block_on(async {
        ctx.repository.store_all(&batch).await?;
        ctx.repository.store(&elsewhere).await?;
        ctx.repository.find_by_event(event_id).await
    })?;

    let names: Vec<&str> = listed.iter().map(|task| task.name().as_str()).collect();
    assert_eq!(names, ["First", "Second"]);
    Ok(())
}

#[rstest]
fn duplicate_batch_stores_nothing(
    context: Result<RepositoryContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context?;
    let event_id = EventId::new();
    let existing = new_task(event_id, "Existing")?;
    let batch = vec![new_task(event_id, "Fresh")?, existing.clone()];

    ctx.runtime.block_on(async {
        ctx.repository.store(&existing).await?;
        let result = ctx.repository.store_all(&batch).await;

        assert!(matches!(result, Err(TaskRepositoryError::DuplicateTask(_))));
        assert_eq!(ctx.repository.find_by_event(event_id).await?.len(), 1);
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn status_edit_and_delete_persist(
    context: Result<RepositoryContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context?;
    let event_id = EventId::new();
    let organizer = actor("olivia@example.com", event_id, ActorRole::Organizer)?;
    let mut task = new_task(event_id, "Hire DJ")?;

    ctx.runtime.block_on(async {
        ctx.repository.store(&task).await?;
        task.update_status(
            &organizer,
            TaskStatus::Delayed,
            TransitionPolicy::Permissive,
            &DefaultClock,
        )?;
        ctx.repository.update(&task).await?;
        let found = ctx
            .repository
            .find_by_id(task.id())
            .await?
            .ok_or("task should exist")?;
        assert_eq!(found.status(), TaskStatus::Delayed);
        assert_eq!(found.priority(), TaskPriority::Medium);

        ctx.repository.delete(task.id()).await?;
        assert!(ctx.repository.find_by_id(task.id()).await?.is_none());
        assert!(matches!(
            ctx.repository.delete(task.id()).await,
            Err(TaskRepositoryError::NotFound(_))
        ));
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn long_names_are_stored_unchanged(
    context: Result<RepositoryContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context?;
    let event_id = EventId::new();
    let task_name = "t".repeat(300);
    let display_name = "Pia ".repeat(80);
    let mut task = new_task(event_id, &task_name)?;
    let participant = Actor::new(
        UserIdentity::parse(&display_name, "pia@example.com")?,
        event_id,
        ActorRole::Participant,
    );

    ctx.runtime.block_on(async {
        ctx.repository.store(&task).await?;
        task.claim(&participant, &DefaultClock)?;
        ctx.repository.claim(&task).await?;

        let found = ctx
            .repository
            .find_by_id(task.id())
            .await?
            .ok_or("task should exist")?;
        assert_eq!(found.name().as_str(), task_name);
        assert_eq!(found.assignee(), task.assignee());
        Ok::<(), BoxError>(())
    })
}
