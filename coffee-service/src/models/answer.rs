use crate::services::prompt::PERSONA_LABEL;
use serde::{Deserialize, Serialize};

/// Body of `POST /ask-coffee`. `question` may be omitted or null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AskCoffeeRequest {
    #[serde(default)]
    pub question: Option<String>,
}

/// Successful answer returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerEnvelope {
    pub status: String,
    /// The question actually asked, after the default was applied.
    pub question: String,
    pub ai_response: String,
    pub model_used: String,
    pub coffee_expert: String,
}

impl AnswerEnvelope {
    pub fn success(question: &str, ai_response: String, model_used: &str) -> Self {
        Self {
            status: "success".to_string(),
            question: question.to_string(),
            ai_response,
            model_used: model_used.to_string(),
            coffee_expert: PERSONA_LABEL.to_string(),
        }
    }
}

/// Static usage metadata served at `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiInfo {
    pub message: &'static str,
    pub description: &'static str,
    pub example: &'static str,
}

impl Default for ApiInfo {
    fn default() -> Self {
        Self {
            message: "Welcome to Coffee AI Assistant!",
            description: "Use POST /ask-coffee to ask questions about coffee",
            example: "POST /ask-coffee with body: {'question': 'What is the best brewing method for coffee?'}",
        }
    }
}
