use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::models::{AnswerEnvelope, ApiInfo, AskCoffeeRequest};
use crate::startup::AppState;
use service_core::error::AppError;

/// Usage metadata. Never calls the provider.
pub async fn root() -> Json<ApiInfo> {
    tracing::info!("Root endpoint called");
    Json(ApiInfo::default())
}

#[tracing::instrument(skip(state, payload))]
pub async fn ask_coffee(
    State(state): State<AppState>,
    payload: Result<Json<AskCoffeeRequest>, JsonRejection>,
) -> Result<Json<AnswerEnvelope>, AppError> {
    tracing::info!("Ask coffee endpoint called");

    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Rejected ask-coffee body");
        AppError::UnprocessableEntity(rejection.body_text())
    })?;

    let envelope = state.questions.answer(request.question.as_deref()).await?;

    Ok(Json(envelope))
}
