//! Error types for plan parsing and validation.

use thiserror::Error;

/// Errors raised while building or parsing event plans.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlanningDomainError {
    /// The event description is empty after trimming.
    #[error("event description must not be empty")]
    EmptyDescription,

    /// The language code is not supported.
    #[error("unsupported plan language: {0}")]
    UnknownLanguage(String),

    /// The AI response could not be decoded as the expected JSON shape.
    #[error("malformed plan response: {0}")]
    MalformedResponse(String),

    /// The generated plan has no usable event title.
    #[error("generated plan has no event title")]
    MissingEventTitle,
}
