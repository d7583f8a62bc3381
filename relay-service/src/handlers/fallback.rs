use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use service_core::error::{AppError, ErrorEnvelope, GENERIC_ERROR_MESSAGE};
use std::any::Any;

/// Unknown path, or a known path with the wrong method.
pub async fn not_found() -> AppError {
    AppError::NotFound("Endpoint not found".to_string())
}

/// Render a panicking handler as the generic 500 envelope.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };

    tracing::error!(panic = %detail, "Request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorEnvelope::new(GENERIC_ERROR_MESSAGE)),
    )
        .into_response()
}
