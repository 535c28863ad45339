//! Plan generation, materialisation and copying through public services.

use super::helpers::{App, app, identity};
use convene::planning::{
    domain::{PlanLanguage, PlanRequest},
    ports::AiResponse,
    services::CopyEventRequest,
};
use convene::task::domain::{TaskPriority, TaskStage, TaskStatus};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn chinese_plan_becomes_event_and_second_edition(app: App) -> Result<(), eyre::Report> {
    app.ai.push(Ok(AiResponse::Text(
        json!({
            "event": {
                "title": "公司年会",
                "date": "2031-01-01",
                "location": "国际会议中心",
                "type": "年会",
                "scale": "200",
                "budget": 50000
            },
            "tasks": [
                { "name": "预订场地", "stage": "筹备阶段", "priority": "紧急" },
                { "name": "现场签到", "stage": "执行阶段", "priority": "高" },
                { "name": "活动总结", "stage": "复盘阶段", "priority": "中" }
            ]
        })
        .to_string(),
    )))?;
    let olivia = identity("Olivia", "olivia@example.com")?;

    let plan = app
        .planner
        .generate_plan(
            PlanRequest::new("2031年12月20日举办公司年会，约200人")
                .with_language(PlanLanguage::Chinese),
        )
        .await?;
    let created = app.planner.create_event_from_plan(&olivia, plan).await?;

    eyre::ensure!(created.tasks.len() == 3, "three tasks created");
    eyre::ensure!(
        created.event.details().date.map(|date| date.to_string()).as_deref() == Some("2031-12-20"),
        "requested date wins"
    );
    let venue = created
        .tasks
        .first()
        .ok_or_else(|| eyre::eyre!("missing first task"))?;
    eyre::ensure!(venue.stage() == TaskStage::Preparation, "stage label parsed");
    eyre::ensure!(venue.priority() == TaskPriority::Urgent, "priority label parsed");

    let organizer = app.events.resolve_actor(created.event.id(), &olivia).await?;
    app.tasks.claim(&organizer, venue.id()).await?;

    let copy = app
        .planner
        .copy_event(
            &organizer,
            CopyEventRequest::new().with_language(PlanLanguage::Chinese),
        )
        .await?;
    eyre::ensure!(copy.event.title().as_str() == "公司年会（第二期）", "suffix added");
    eyre::ensure!(copy.tasks.len() == 3, "all tasks copied");
    eyre::ensure!(
        copy.tasks
            .iter()
            .all(|task| task.status() == TaskStatus::Pending && !task.is_claimed()),
        "copied tasks start fresh"
    );
    Ok(())
}
