//! `/test-ai` connectivity check tests.

mod common;

use axum::http::StatusCode;
use common::{app_with, get, send};
use relay_service::services::prompt::DIAGNOSTIC_PROMPT;
use relay_service::services::providers::mock::MockTextProvider;
use relay_service::services::providers::ProviderError;
use std::sync::Arc;

#[tokio::test]
async fn reports_success_with_truncated_sample() {
    let reply = "a".repeat(250);
    let provider = Arc::new(MockTextProvider::replying(reply));
    let app = app_with(provider.clone());

    let (status, body) = send(app, get("/test-ai")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Gemini API connection successful");
    assert_eq!(body["sample_response"], format!("{}...", "a".repeat(100)));
    assert_eq!(provider.last_prompt().as_deref(), Some(DIAGNOSTIC_PROMPT));
}

#[tokio::test]
async fn sample_is_not_formatted() {
    let app = app_with(Arc::new(MockTextProvider::replying("# Sure!")));

    let (_, body) = send(app, get("/test-ai")).await;

    assert_eq!(body["sample_response"], "# Sure!...");
}

#[tokio::test]
async fn reports_failure_with_raw_error() {
    let error =
        ProviderError::ApiError("Gemini API error 503 Service Unavailable: overloaded".to_string());
    let app = app_with(Arc::new(MockTextProvider::failing(error.clone())));

    let (status, body) = send(app, get("/test-ai")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Gemini API connection failed");
    assert_eq!(body["error"], error.to_string());
    assert!(body.get("sample_response").is_none());
}
