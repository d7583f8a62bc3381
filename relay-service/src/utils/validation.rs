use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde_json::Value;
use service_core::error::AppError;
use thiserror::Error;

use crate::dtos::ChatRequest;
use crate::services::providers::ProviderErrorKind;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Absent, `null`, `false`, `0` or a string that is blank once trimmed.
    #[error("Question is required")]
    Missing,

    /// A present value that is not text, e.g. `42`, `true` or an object.
    #[error("Question must be a string")]
    NotText,
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Missing => AppError::BadRequest(err.to_string()),
            ValidationError::NotText => {
                AppError::Upstream(ProviderErrorKind::Generic.user_message().to_string())
            }
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Trim the question and reject it when nothing usable is left.
pub fn validate_question(raw: Option<&Value>) -> Result<&str, ValidationError> {
    let value = match raw {
        Some(value) if !is_falsy(value) => value,
        _ => return Err(ValidationError::Missing),
    };

    let text = value.as_str().ok_or(ValidationError::NotText)?.trim();
    if text.is_empty() {
        return Err(ValidationError::Missing);
    }
    Ok(text)
}

/// Extracts a validated, trimmed question from a `ChatRequest` body.
///
/// Only a JSON object can carry a question. An array or a body without a JSON
/// content type is treated as a missing question. Malformed JSON and top-level
/// scalars are internal failures.
pub struct QuestionJson(pub String);

#[async_trait]
impl<S> FromRequest<S> for QuestionJson
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = match Json::<Value>::from_request(req, state).await {
            Ok(Json(body)) => body,
            Err(JsonRejection::JsonSyntaxError(e)) => {
                return Err(AppError::InternalError(anyhow::anyhow!(
                    "Malformed JSON body: {}",
                    e.body_text()
                )));
            }
            Err(JsonRejection::BytesRejection(e)) => {
                return Err(AppError::InternalError(anyhow::anyhow!(
                    "Failed to read request body: {}",
                    e.body_text()
                )));
            }
            Err(rejection) => {
                tracing::debug!(rejection = %rejection.body_text(), "Chat body treated as empty");
                Value::Object(Default::default())
            }
        };

        let request = match body {
            Value::Object(_) => serde_json::from_value::<ChatRequest>(body)
                .map_err(|e| AppError::InternalError(e.into()))?,
            Value::Array(_) => {
                tracing::debug!("Chat body is an array, treated as empty");
                ChatRequest::default()
            }
            other => {
                return Err(AppError::InternalError(anyhow::anyhow!(
                    "Chat body must be a JSON object or array, got {}",
                    other
                )));
            }
        };

        let question = validate_question(request.question.as_ref()).inspect_err(|err| {
            if *err == ValidationError::NotText {
                tracing::warn!("Chat question is not a string");
            }
        })?;
        Ok(QuestionJson(question.to_string()))
    }
}
