//! Port contracts for event planning.

pub mod ai;

pub use ai::{AiClient, AiClientError, AiClientResult, AiRequest, AiResponse};

#[cfg(test)]
pub use ai::MockAiClient;
