//! Gemini AI provider implementation.
//!
//! Implements single-shot text generation using Google's Gemini API.

use super::{FinishReason, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gemini API base URL.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Transport timeout for one generateContent round trip.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
}

/// Gemini text provider.
pub struct GeminiTextProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiTextProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Build the API URL for the given model and method.
    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            GEMINI_API_BASE, self.config.model, method, self.config.api_key
        )
    }
}

#[async_trait]
impl TextProvider for GeminiTextProvider {
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "Gemini API key not configured".to_string(),
            ));
        }

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.api_url("generateContent"))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(error_from_status(status, &error_text));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        into_provider_response(api_response)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

/// Map a non-success HTTP reply to a structured provider error.
fn error_from_status(status: StatusCode, body: &str) -> ProviderError {
    let detail = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error);

    let message = detail
        .as_ref()
        .and_then(|d| d.message.clone())
        .unwrap_or_else(|| body.to_string());
    let api_status = detail.as_ref().and_then(|d| d.status.as_deref());
    let key_invalid = detail.as_ref().is_some_and(|d| {
        d.details
            .iter()
            .any(|info| info.reason.as_deref() == Some("API_KEY_INVALID"))
    });

    if status == StatusCode::TOO_MANY_REQUESTS || api_status == Some("RESOURCE_EXHAUSTED") {
        return ProviderError::RateLimited(message);
    }

    if key_invalid || status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return ProviderError::NotConfigured(message);
    }

    if status == StatusCode::BAD_REQUEST {
        return ProviderError::InvalidRequest(message);
    }

    ProviderError::ApiError(format!("Gemini API error {}: {}", status, message))
}

fn into_provider_response(
    api_response: GenerateContentResponse,
) -> Result<ProviderResponse, ProviderError> {
    if let Some(reason) = api_response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        return Err(ProviderError::ContentFiltered(format!(
            "prompt blocked: {}",
            reason
        )));
    }

    let candidate = api_response
        .candidates
        .first()
        .ok_or_else(|| ProviderError::ApiError("Response contained no candidates".to_string()))?;

    let finish_reason = match candidate.finish_reason.as_deref() {
        Some("STOP") | None => FinishReason::Complete,
        Some("MAX_TOKENS") => FinishReason::Length,
        Some("SAFETY") | Some("PROHIBITED_CONTENT") | Some("BLOCKLIST") => {
            FinishReason::ContentFilter
        }
        Some(_) => FinishReason::Other,
    };

    if finish_reason == FinishReason::ContentFilter {
        return Err(ProviderError::ContentFiltered(format!(
            "candidate finished with {}",
            candidate.finish_reason.as_deref().unwrap_or_default()
        )));
    }

    let text: String = candidate
        .content
        .as_ref()
        .map(|c| c.parts.iter().filter_map(|p| p.text.as_deref()).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(ProviderError::ApiError(
            "Response contained no text".to_string(),
        ));
    }

    let usage = api_response.usage_metadata.unwrap_or_default();

    Ok(ProviderResponse {
        text,
        input_tokens: usage.prompt_token_count.unwrap_or(0),
        output_tokens: usage.candidates_token_count.unwrap_or(0),
        finish_reason,
    })
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<i32>,
    candidates_token_count: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    details: Vec<ErrorInfo>,
}

#[derive(Debug, Deserialize)]
struct ErrorInfo {
    #[serde(default)]
    reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::ProviderErrorKind;
    use serde_json::json;

    fn parse(body: &str) -> GenerateContentResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn joins_all_text_parts_of_first_candidate() {
        let response = parse(
            r#"{
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "Hello, "}, {"text": "learner!"}]},
                    "finishReason": "STOP"
                }],
                "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 4, "totalTokenCount": 16}
            }"#,
        );

        let result = into_provider_response(response).unwrap();
        assert_eq!(result.text, "Hello, learner!");
        assert_eq!(result.input_tokens, 12);
        assert_eq!(result.output_tokens, 4);
        assert_eq!(result.finish_reason, FinishReason::Complete);
    }

    #[test]
    fn safety_finish_reason_is_content_filtered() {
        let response = parse(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#);
        let err = into_provider_response(response).unwrap_err();
        assert_eq!(err.kind(), ProviderErrorKind::Safety);
    }

    #[test]
    fn blocked_prompt_is_content_filtered() {
        let response = parse(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#);
        let err = into_provider_response(response).unwrap_err();
        assert!(matches!(err, ProviderError::ContentFiltered(_)));
    }

    #[test]
    fn empty_candidates_is_an_api_error() {
        let err = into_provider_response(parse("{}")).unwrap_err();
        assert!(matches!(err, ProviderError::ApiError(_)));
    }

    #[test]
    fn invalid_key_maps_to_configuration() {
        let body = r#"{
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT",
                "details": [{"@type": "type.googleapis.com/google.rpc.ErrorInfo", "reason": "API_KEY_INVALID"}]
            }
        }"#;

        let err = error_from_status(StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, ProviderError::NotConfigured(_)));
        assert_eq!(err.kind(), ProviderErrorKind::Configuration);
    }

    #[test]
    fn exhausted_quota_maps_to_rate_limited() {
        let body = json!({
            "error": {
                "code": 429,
                "message": "Resource has been exhausted (e.g. check quota).",
                "status": "RESOURCE_EXHAUSTED"
            }
        })
        .to_string();
        let err = error_from_status(StatusCode::TOO_MANY_REQUESTS, &body);
        assert_eq!(err.kind(), ProviderErrorKind::Quota);
    }

    #[test]
    fn unparseable_error_body_keeps_raw_text() {
        let err = error_from_status(StatusCode::BAD_GATEWAY, "upstream exploded");
        let expected = "Gemini API error 502 Bad Gateway: upstream exploded";
        assert_eq!(err, ProviderError::ApiError(expected.to_string()));
        assert_eq!(err.kind(), ProviderErrorKind::Generic);
    }

    #[tokio::test]
    async fn missing_key_fails_before_network() {
        let provider = GeminiTextProvider::new(GeminiConfig {
            api_key: String::new(),
            model: "gemini-1.5-flash".to_string(),
        })
        .unwrap();

        let err = provider.generate("Hello").await.unwrap_err();
        assert_eq!(err.kind(), ProviderErrorKind::Configuration);
    }
}
