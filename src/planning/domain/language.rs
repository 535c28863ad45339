//! Language used for prompts and generated plan labels.

use super::PlanningDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Language of the planning conversation with the AI service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanLanguage {
    /// Simplified Chinese.
    #[serde(rename = "zh")]
    Chinese,
    /// English.
    #[default]
    #[serde(rename = "en")]
    English,
}

impl PlanLanguage {
    /// Returns the language code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chinese => "zh",
            Self::English => "en",
        }
    }

    /// Suffix appended to the title of a copied event.
    #[must_use]
    pub const fn copy_title_suffix(self) -> &'static str {
        match self {
            Self::Chinese => "（第二期）",
            Self::English => " (Second Edition)",
        }
    }
}

impl TryFrom<&str> for PlanLanguage {
    type Error = PlanningDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "zh" | "zh-cn" | "chinese" => Ok(Self::Chinese),
            "en" | "en-us" | "english" => Ok(Self::English),
            _ => Err(PlanningDomainError::UnknownLanguage(value.to_owned())),
        }
    }
}

impl fmt::Display for PlanLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
