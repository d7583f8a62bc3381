use crate::dtos::ChatResponse;
use crate::services::providers::generate_observed;
use crate::services::{compose_prompt, format_response};
use crate::startup::AppState;
use crate::utils::QuestionJson;
use axum::{extract::State, Json};
use service_core::error::AppError;

/// Wrap the learner's question in the tutoring prompt, ask the provider once,
/// and return the formatted answer.
pub async fn chat(
    State(state): State<AppState>,
    QuestionJson(question): QuestionJson,
) -> Result<Json<ChatResponse>, AppError> {
    let prompt = compose_prompt(&question);

    let response = generate_observed(state.text_provider.as_ref(), &prompt)
        .await
        .map_err(|e| AppError::Upstream(e.user_message().to_string()))?;

    Ok(Json(ChatResponse::new(format_response(&response.text))))
}
