//! Port for invoking the external AI text-generation service.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Prompt sent to the AI service.
#[derive(Debug, Clone, PartialEq)]
pub struct AiRequest {
    /// Prompt text.
    pub prompt: String,
    /// JSON schema the response should follow, when structured output is
    /// wanted.
    pub response_schema: Option<Value>,
}

impl AiRequest {
    /// Creates a free-text request.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: None,
        }
    }

    /// Asks for output matching `schema`.
    #[must_use]
    pub fn with_response_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

/// Response returned by the AI service.
#[derive(Debug, Clone, PartialEq)]
pub enum AiResponse {
    /// Already-decoded JSON output.
    Structured(Value),
    /// Raw text, possibly containing JSON.
    Text(String),
}

/// Result type for AI client operations.
pub type AiClientResult<T> = Result<T, AiClientError>;

/// AI invocation contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Sends a prompt and waits for the answer.
    ///
    /// # Errors
    ///
    /// Returns [`AiClientError`] when the service cannot be reached or
    /// refuses the request.
    async fn invoke(&self, request: AiRequest) -> AiClientResult<AiResponse>;
}

/// Errors returned by AI client implementations.
#[derive(Debug, Clone, Error)]
pub enum AiClientError {
    /// The service produced no answer.
    #[error("AI service returned no response")]
    NoResponse,

    /// Transport or provider failure.
    #[error("AI service error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl AiClientError {
    /// Wraps a provider error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
