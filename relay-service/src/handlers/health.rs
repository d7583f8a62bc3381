use crate::dtos::HealthResponse;
use axum::Json;

/// Liveness check. Never touches the provider.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
