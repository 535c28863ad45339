//! Configuration for the event planning service.

use serde::{Deserialize, Serialize};

/// Configuration for [`super::EventPlanningService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// Months added to today when the AI proposes a past event date. Also the
    /// start of the window suggested to the AI; the window ends at twice
    /// this offset.
    pub past_date_shift_months: u32,
    /// Maximum number of generated tasks kept from one plan.
    pub max_planned_tasks: usize,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl PlanningConfig {
    /// Creates the default configuration.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            past_date_shift_months: 3,
            max_planned_tasks: 50,
        }
    }
}
