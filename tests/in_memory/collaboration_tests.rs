//! End-to-end task collaboration between an organizer and participants.

use super::helpers::{App, app, roster};
use convene::task::{
    domain::{TaskStatus, TaskSummary},
    services::{
        CreateTaskRequest, EditTaskRequest, SubmitSolutionRequest, TaskErrorCategory,
    },
};
use eyre::WrapErr;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn claim_submit_and_reopen_workflow(app: App) -> Result<(), eyre::Report> {
    let roster = roster(&app, "Charity Run").await?;
    let task = app
        .tasks
        .create_task(&roster.organizer, CreateTaskRequest::new("T1"))
        .await
        .wrap_err("create T1")?;

    let before = app.tasks.permissions(&roster.first, task.id()).await?;
    eyre::ensure!(before.claim && !before.submit_solution, "P1 may only claim");

    let claimed = app.tasks.claim(&roster.first, task.id()).await?;
    eyre::ensure!(claimed.status() == TaskStatus::InProgress, "claim starts work");

    let second_claim = app.tasks.claim(&roster.second, task.id()).await;
    eyre::ensure!(
        matches!(&second_claim, Err(err) if err.category() == TaskErrorCategory::AlreadyClaimed),
        "P2 claim should be rejected, got {second_claim:?}"
    );

    let foreign_submit = app
        .tasks
        .submit_solution(&roster.second, task.id(), SubmitSolutionRequest::new("x"))
        .await;
    eyre::ensure!(
        matches!(&foreign_submit, Err(err) if err.category() == TaskErrorCategory::PermissionDenied),
        "P2 may not submit for P1"
    );

    let submitted = app
        .tasks
        .submit_solution(
            &roster.first,
            task.id(),
            SubmitSolutionRequest::new("Route approved by the council")
                .with_files(["https://files.example.com/route.pdf".to_owned()]),
        )
        .await?;
    eyre::ensure!(submitted.status() == TaskStatus::Completed, "submission completes");

    let participant_edit = app
        .tasks
        .edit(&roster.first, task.id(), EditTaskRequest::new().with_name("T1b"))
        .await;
    eyre::ensure!(
        matches!(&participant_edit, Err(err) if err.category() == TaskErrorCategory::PermissionDenied),
        "participants may not edit"
    );

    let reopened = app
        .tasks
        .update_status(&roster.organizer, task.id(), TaskStatus::Pending)
        .await?;
    eyre::ensure!(reopened.status() == TaskStatus::Pending, "organizer may reopen");
    eyre::ensure!(reopened.is_claimed(), "reopening keeps the assignee");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn summary_reflects_event_progress(app: App) -> Result<(), eyre::Report> {
    let roster = roster(&app, "Book Fair").await?;
    let created = app
        .tasks
        .create_tasks(
            &roster.organizer,
            ["Tables", "Signage", "Volunteers", "Cashbox"].map(CreateTaskRequest::new),
        )
        .await?;
    let ids: Vec<_> = created.iter().map(|task| task.id()).collect();
    let [tables, signage, volunteers, _] = ids.as_slice() else {
        return Err(eyre::eyre!("expected four tasks"));
    };

    for (actor, task_id) in [
        (&roster.first, *tables),
        (&roster.first, *signage),
        (&roster.second, *volunteers),
    ] {
        app.tasks.claim(actor, task_id).await?;
        app.tasks
            .submit_solution(actor, task_id, SubmitSolutionRequest::new("done"))
            .await?;
    }
    app.tasks
        .update_status(&roster.organizer, *volunteers, TaskStatus::Delayed)
        .await?;

    let summary: TaskSummary = app.tasks.summarize_event(&roster.organizer).await?;

    eyre::ensure!(summary.total == 4, "total {}", summary.total);
    eyre::ensure!(summary.completed == 2, "completed {}", summary.completed);
    eyre::ensure!(summary.delayed == 1, "delayed {}", summary.delayed);
    eyre::ensure!(summary.completion_percent == 50, "percent {}", summary.completion_percent);
    let leader = summary
        .top_performers
        .first()
        .ok_or_else(|| eyre::eyre!("expected a top performer"))?;
    eyre::ensure!(leader.name == "Pia" && leader.completed_tasks == 2, "Pia leads");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn release_and_delete_are_role_checked(app: App) -> Result<(), eyre::Report> {
    let roster = roster(&app, "Street Party").await?;
    let task = app
        .tasks
        .create_task(&roster.organizer, CreateTaskRequest::new("Bunting"))
        .await?;
    app.tasks.claim(&roster.first, task.id()).await?;

    let stranger_release = app.tasks.release(&roster.second, task.id()).await;
    eyre::ensure!(stranger_release.is_err(), "P2 may not release P1's task");

    let released = app.tasks.release(&roster.first, task.id()).await?;
    eyre::ensure!(!released.is_claimed(), "release clears the assignee");
    app.tasks.claim(&roster.second, task.id()).await?;

    let participant_delete = app.tasks.delete(&roster.second, task.id()).await;
    eyre::ensure!(participant_delete.is_err(), "participants may not delete");
    app.tasks.delete(&roster.organizer, task.id()).await?;
    eyre::ensure!(
        app.tasks.find_by_id(task.id()).await?.is_none(),
        "task should be gone"
    );
    Ok(())
}
