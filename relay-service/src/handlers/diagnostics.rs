use crate::dtos::DiagnosticResponse;
use crate::services::prompt::DIAGNOSTIC_PROMPT;
use crate::services::providers::generate_observed;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// Send a fixed prompt to the provider and report whether it answered.
pub async fn test_ai(State(state): State<AppState>) -> (StatusCode, Json<DiagnosticResponse>) {
    match generate_observed(state.text_provider.as_ref(), DIAGNOSTIC_PROMPT).await {
        Ok(response) => (
            StatusCode::OK,
            Json(DiagnosticResponse::connected(&response.text)),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(DiagnosticResponse::failed(e)),
        ),
    }
}
