//! Session identities, event membership and cross-event isolation.

use super::helpers::{App, app, identity, roster};
use convene::event::{domain::ActorRole, services::CreateEventRequest};
use convene::identity::{
    adapters::memory::InMemorySession, domain::IdentityError, ports::SessionProvider,
};
use convene::task::services::{CreateTaskRequest, TaskErrorCategory};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn session_identity_becomes_organizer(app: App) -> Result<(), eyre::Report> {
    let session = InMemorySession::signed_in(identity("Olivia", "Olivia@Example.com")?);
    let current = session.current_identity().await?;

    let event = app
        .events
        .create_event(&current, CreateEventRequest::new("Quiz Night"))
        .await?;
    let actor = app.events.resolve_actor(event.id(), &current).await?;

    eyre::ensure!(actor.role() == ActorRole::Organizer, "creator organizes");
    eyre::ensure!(
        event.organizer().as_str() == "olivia@example.com",
        "emails are normalised"
    );

    session.set(None);
    eyre::ensure!(
        session.current_identity().await == Err(IdentityError::Unauthenticated),
        "signed-out session has no identity"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn strangers_cannot_act_until_they_join(app: App) -> Result<(), eyre::Report> {
    let roster = roster(&app, "Bake Sale").await?;
    let stranger = identity("Sam", "sam@example.com")?;

    eyre::ensure!(
        app.events.resolve_actor(roster.event.id(), &stranger).await.is_err(),
        "strangers have no role"
    );

    app.events.join(roster.event.id(), &stranger).await?;
    let actor = app.events.resolve_actor(roster.event.id(), &stranger).await?;
    eyre::ensure!(actor.role() == ActorRole::Participant, "joining grants access");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn organizer_of_one_event_cannot_touch_another(app: App) -> Result<(), eyre::Report> {
    let fair = roster(&app, "Fair").await?;
    let other_owner = identity("Rhea", "rhea@example.com")?;
    let gala = app
        .events
        .create_event(&other_owner, CreateEventRequest::new("Gala"))
        .await?;
    let gala_organizer = app.events.resolve_actor(gala.id(), &other_owner).await?;
    let gala_task = app
        .tasks
        .create_task(&gala_organizer, CreateTaskRequest::new("Lighting"))
        .await?;

    let claim = app.tasks.claim(&fair.organizer, gala_task.id()).await;
    eyre::ensure!(
        matches!(&claim, Err(err) if err.category() == TaskErrorCategory::PermissionDenied),
        "foreign actors are denied, got {claim:?}"
    );
    let create = app
        .tasks
        .create_task(&fair.first, CreateTaskRequest::new("Extra"))
        .await;
    eyre::ensure!(
        matches!(&create, Err(err) if err.category() == TaskErrorCategory::PermissionDenied),
        "participants may not create tasks"
    );
    Ok(())
}
