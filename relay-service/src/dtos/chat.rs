use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /chat`.
///
/// `question` is kept as raw JSON so that non-string values can be told apart
/// from a missing one during validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub question: Option<Value>,
}

/// Successful `/chat` reply. Failures use `service_core::error::ErrorEnvelope`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub answer: String,
    pub success: bool,
}

impl ChatResponse {
    pub fn new(answer: String) -> Self {
        Self {
            answer,
            success: true,
        }
    }
}
