//! Domain model for AI-assisted event planning.
//!
//! Plans are value objects: they carry no identity until the planning
//! service turns them into an event and its tasks.

mod date;
mod error;
mod language;
mod parse;
mod plan;

pub use date::{DateRules, extract_requested_date};
pub use error::PlanningDomainError;
pub use language::PlanLanguage;
pub use parse::{extract_json, parse_follow_up, parse_plan};
pub use plan::{EventDraft, EventPlan, FollowUpSuggestions, PlanRequest, PlannedTask};
