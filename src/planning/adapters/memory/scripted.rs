//! AI client that replays queued responses, for tests and demos.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::planning::ports::{AiClient, AiClientError, AiClientResult, AiRequest, AiResponse};

/// Thread-safe AI client returning pre-recorded responses in order.
///
/// Every request is recorded so callers can inspect the rendered prompts.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAiClient {
    state: Arc<Mutex<ScriptState>>,
}

#[derive(Debug, Default)]
struct ScriptState {
    responses: VecDeque<AiClientResult<AiResponse>>,
    requests: Vec<AiRequest>,
}

fn lock_error(err: impl ToString) -> AiClientError {
    AiClientError::backend(std::io::Error::other(err.to_string()))
}

impl ScriptedAiClient {
    /// Creates a client with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response.
    ///
    /// # Errors
    ///
    /// Returns [`AiClientError::Backend`] when the internal lock is poisoned.
    pub fn push(&self, response: AiClientResult<AiResponse>) -> AiClientResult<()> {
        let mut state = self.state.lock().map_err(lock_error)?;
        state.responses.push_back(response);
        Ok(())
    }

    /// Returns every request received so far.
    ///
    /// # Errors
    ///
    /// Returns [`AiClientError::Backend`] when the internal lock is poisoned.
    pub fn requests(&self) -> AiClientResult<Vec<AiRequest>> {
        let state = self.state.lock().map_err(lock_error)?;
        Ok(state.requests.clone())
    }
}

#[async_trait]
impl AiClient for ScriptedAiClient {
    async fn invoke(&self, request: AiRequest) -> AiClientResult<AiResponse> {
        let mut state = self.state.lock().map_err(lock_error)?;
        state.requests.push(request);
        state
            .responses
            .pop_front()
            .unwrap_or(Err(AiClientError::NoResponse))
    }
}
