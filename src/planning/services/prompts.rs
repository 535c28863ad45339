//! Prompt templates and response schemas sent to the AI service.

use super::PlanningError;
use crate::event::domain::Event;
use crate::planning::domain::{DateRules, PlanLanguage};
use crate::task::domain::TaskSummary;
use minijinja::Environment;
use serde::Serialize;
use serde_json::{Value, json};

const PLAN_PROMPT_EN: &str = "\
You are a professional event planning assistant.

{% if requested_date %}The organizer specified the date {{ requested_date }}. \
Use exactly this date in the date field; do not adjust it.
{% else %}Today is {{ today }}. The description names no date, so choose one \
between {{ earliest }} and {{ latest }}.
{% endif %}
Event description: {{ description }}

Return JSON with an \"event\" object (title, date as YYYY-MM-DD, time, \
location, type, scale, description, special_requirements, organizer, budget) \
and a \"tasks\" array. Each task has name, description, stage \
(Preparation/Execution/Review) and priority (Low/Medium/High/Urgent).";

const PLAN_PROMPT_ZH: &str = "\
你是专业的活动策划助手。根据用户描述生成活动方案。

{% if requested_date %}用户明确指定了日期：{{ requested_date }}。\
你必须在 date 字段中直接使用这个日期，不要修改。
{% else %}今天是 {{ today }}。用户没有指定日期，请使用 {{ earliest }} 到 {{ latest }} 之间的日期。
{% endif %}
用户描述：{{ description }}

请返回 JSON：event 对象（title、date 格式为 YYYY-MM-DD、time、location、type、\
scale、description、special_requirements、organizer、budget）以及 tasks 数组。\
每个任务包含 name、description、stage（筹备阶段/执行阶段/复盘阶段）和 \
priority（低/中/高/紧急）。";

const FOLLOW_UP_PROMPT_EN: &str = "\
You are a professional event planning consultant. Suggest improvements for \
the next edition of a similar event.

Previous event:
- Name: {{ title }}
- Type: {{ event_type }}
- Scale: {{ scale }} people
- Location: {{ location }}

Task results:
- Total tasks: {{ summary.total }}
- Completed: {{ summary.completed }} ({{ summary.completion_percent }}%)
- Delayed: {{ summary.delayed }}
- High priority: {{ summary.high_priority }}
{% if summary.top_performers %}- Top performers: \
{% for performer in summary.top_performers %}{{ performer.name }} \
({{ performer.completed_tasks }}){% if not loop.last %}, {% endif %}{% endfor %}
{% endif %}
Return JSON with improvements (list of strings), new_tasks (name, \
description, stage, priority, reason), timeline_suggestions and \
budget_optimization.";

const FOLLOW_UP_PROMPT_ZH: &str = "\
你是一个专业的活动策划顾问。根据上一次活动的执行情况，为下一次同类型活动提供优化建议。

上次活动信息：
- 名称：{{ title }}
- 类型：{{ event_type }}
- 规模：{{ scale }}人
- 地点：{{ location }}

任务完成情况：
- 总任务数：{{ summary.total }}
- 已完成：{{ summary.completed }}（{{ summary.completion_percent }}%）
- 延期任务：{{ summary.delayed }}
- 高优先级任务：{{ summary.high_priority }}
{% if summary.top_performers %}- 任务完成最多：\
{% for performer in summary.top_performers %}{{ performer.name }}\
（{{ performer.completed_tasks }}个任务）{% if not loop.last %}、{% endif %}{% endfor %}
{% endif %}
请返回 JSON：improvements（字符串列表）、new_tasks（name、description、stage、\
priority、reason）、timeline_suggestions 和 budget_optimization。";

const UNKNOWN: &str = "-";

#[derive(Debug, Serialize)]
struct PlanContext<'a> {
    description: &'a str,
    today: String,
    earliest: String,
    latest: String,
    requested_date: Option<String>,
}

#[derive(Debug, Serialize)]
struct FollowUpContext<'a> {
    title: &'a str,
    event_type: &'a str,
    scale: String,
    location: &'a str,
    summary: &'a TaskSummary,
}

fn render(
    template_name: &'static str,
    template: &str,
    context: impl Serialize,
) -> Result<String, PlanningError> {
    let environment = Environment::new();
    environment
        .render_str(template, context)
        .map_err(|error| PlanningError::TemplateRender {
            template: template_name,
            reason: error.to_string(),
        })
}

/// Renders the prompt asking for a new event plan.
pub(super) fn plan_prompt(
    language: PlanLanguage,
    description: &str,
    rules: &DateRules,
) -> Result<String, PlanningError> {
    let template = match language {
        PlanLanguage::Chinese => PLAN_PROMPT_ZH,
        PlanLanguage::English => PLAN_PROMPT_EN,
    };
    let context = PlanContext {
        description,
        today: rules.today.to_string(),
        earliest: rules.earliest_suggestion().to_string(),
        latest: rules.latest_suggestion().to_string(),
        requested_date: rules.requested.map(|date| date.to_string()),
    };
    render("plan", template, context)
}

/// Renders the prompt asking for follow-up suggestions.
pub(super) fn follow_up_prompt(
    language: PlanLanguage,
    event: &Event,
    summary: &TaskSummary,
) -> Result<String, PlanningError> {
    let template = match language {
        PlanLanguage::Chinese => FOLLOW_UP_PROMPT_ZH,
        PlanLanguage::English => FOLLOW_UP_PROMPT_EN,
    };
    let details = event.details();
    let context = FollowUpContext {
        title: event.title().as_str(),
        event_type: details.event_type.as_deref().unwrap_or(UNKNOWN),
        scale: details
            .scale
            .map_or_else(|| UNKNOWN.to_owned(), |scale| scale.to_string()),
        location: details.location.as_deref().unwrap_or(UNKNOWN),
        summary,
    };
    render("follow-up", template, context)
}

fn planned_task_schema(with_reason: bool) -> Value {
    let mut properties = json!({
        "name": { "type": "string" },
        "description": { "type": "string" },
        "stage": { "type": "string" },
        "priority": { "type": "string" },
    });
    if with_reason && let Some(map) = properties.as_object_mut() {
        map.insert("reason".to_owned(), json!({ "type": "string" }));
    }
    json!({ "type": "object", "properties": properties })
}

/// JSON schema of a generated plan.
pub(super) fn plan_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "event": {
                "type": "object",
                "properties": {
                    "title": { "type": "string" },
                    "date": { "type": "string" },
                    "time": { "type": "string" },
                    "location": { "type": "string" },
                    "type": { "type": "string" },
                    "scale": { "type": "number" },
                    "description": { "type": "string" },
                    "special_requirements": { "type": "array", "items": { "type": "string" } },
                    "organizer": { "type": "string" },
                    "budget": { "type": "number" },
                },
            },
            "tasks": { "type": "array", "items": planned_task_schema(false) },
        },
    })
}

/// JSON schema of follow-up suggestions.
pub(super) fn follow_up_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "improvements": { "type": "array", "items": { "type": "string" } },
            "new_tasks": { "type": "array", "items": planned_task_schema(true) },
            "timeline_suggestions": { "type": "string" },
            "budget_optimization": { "type": "string" },
        },
    })
}
