//! The question service: default question, prompt, one provider call, and the
//! mapping from provider failures to caller-facing errors.

use super::metrics;
use super::prompt::{build_messages, effective_question};
use super::providers::{CompletionProvider, CompletionRequest, ProviderError};
use crate::config::CompletionConfig;
use crate::models::AnswerEnvelope;
use service_core::error::AppError;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AskError {
    #[error(
        "OpenAI API key not configured or invalid. Please set OPENAI_API_KEY environment variable."
    )]
    AuthError,

    #[error("OpenAI API rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("OpenAI API error: {0}")]
    ProviderError(String),

    #[error("Failed to get coffee advice: {0}")]
    UnknownError(String),
}

impl AskError {
    pub fn kind(&self) -> &'static str {
        match self {
            AskError::AuthError => "auth_error",
            AskError::RateLimited => "rate_limited",
            AskError::ProviderError(_) => "provider_error",
            AskError::UnknownError(_) => "unknown_error",
        }
    }
}

impl From<ProviderError> for AskError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Authentication(_) => AskError::AuthError,
            ProviderError::RateLimited(_) => AskError::RateLimited,
            e @ ProviderError::Api { .. } => AskError::ProviderError(e.to_string()),
            e @ (ProviderError::Network(_) | ProviderError::InvalidResponse(_)) => {
                AskError::UnknownError(e.to_string())
            }
        }
    }
}

impl From<AskError> for AppError {
    fn from(err: AskError) -> Self {
        let detail = err.to_string();
        match err {
            AskError::AuthError => AppError::Unauthorized(detail),
            AskError::RateLimited => AppError::TooManyRequests(detail, None),
            AskError::ProviderError(_) | AskError::UnknownError(_) => AppError::ServerError(detail),
        }
    }
}

/// Answers coffee questions through a completion provider.
#[derive(Clone)]
pub struct QuestionService {
    provider: Arc<dyn CompletionProvider>,
    completion: CompletionConfig,
}

impl QuestionService {
    pub fn new(provider: Arc<dyn CompletionProvider>, completion: CompletionConfig) -> Self {
        Self {
            provider,
            completion,
        }
    }

    pub fn model(&self) -> &str {
        &self.completion.model
    }

    #[tracing::instrument(
        name = "ask_coffee_question",
        skip(self, question),
        fields(provider = self.provider.name(), model = %self.completion.model)
    )]
    pub async fn answer(&self, question: Option<&str>) -> Result<AnswerEnvelope, AskError> {
        let question = effective_question(question);
        tracing::info!(question = %question, "Asking completion provider about coffee");

        let request = CompletionRequest {
            model: self.completion.model.clone(),
            messages: build_messages(question),
            max_tokens: self.completion.max_tokens,
            temperature: self.completion.temperature,
        };

        let start = Instant::now();
        let result = self.provider.complete(&request).await;
        metrics::record_provider_latency(
            self.provider.name(),
            &self.completion.model,
            start.elapsed().as_secs_f64(),
        );

        match result {
            Ok(completion) => {
                tracing::info!(
                    finish_reason = completion.finish_reason.as_deref().unwrap_or("-"),
                    completion_tokens = completion.completion_tokens.unwrap_or(0),
                    "Received answer from completion provider"
                );
                metrics::record_question("success");
                Ok(AnswerEnvelope::success(
                    question,
                    completion.text,
                    &self.completion.model,
                ))
            }
            Err(e) => {
                metrics::record_provider_error(self.provider.name(), e.error_type());
                let err = AskError::from(e);
                tracing::error!(kind = err.kind(), error = %err, "Completion provider call failed");
                metrics::record_question(err.kind());
                Err(err)
            }
        }
    }
}
