//! Application services for AI-assisted event planning.

mod config;
mod planner;
mod prompts;

pub use config::PlanningConfig;
pub use planner::{
    CopyEventRequest, CreatedEvent, EventPlanningService, PlanningError, PlanningResult,
};
