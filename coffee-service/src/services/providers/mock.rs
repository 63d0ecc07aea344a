//! Mock provider implementation for testing.

use super::{Completion, CompletionProvider, CompletionRequest, ProviderError};
use async_trait::async_trait;
use std::sync::Mutex;

/// Mock completion provider that returns one scripted outcome for every call
/// and remembers the requests it saw.
pub struct MockCompletionProvider {
    outcome: Result<String, ProviderError>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockCompletionProvider {
    /// Always answer with `text`.
    pub fn answering(text: impl Into<String>) -> Self {
        Self {
            outcome: Ok(text.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always fail with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self {
            outcome: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        if let Ok(mut seen) = self.requests.lock() {
            seen.push(request.clone());
        }

        self.outcome.clone().map(|text| Completion {
            text,
            model: Some(request.model.clone()),
            finish_reason: Some("stop".to_string()),
            prompt_tokens: None,
            completion_tokens: None,
        })
    }
}
