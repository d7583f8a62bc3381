use serde::Serialize;

/// Characters of model output echoed back by the connectivity check.
pub const SAMPLE_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DiagnosticResponse {
    pub fn connected(text: &str) -> Self {
        let preview: String = text.chars().take(SAMPLE_PREVIEW_CHARS).collect();

        Self {
            success: true,
            message: "Gemini API connection successful".to_string(),
            sample_response: Some(format!("{}...", preview)),
            error: None,
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            message: "Gemini API connection failed".to_string(),
            sample_response: None,
            error: Some(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_is_truncated_by_characters() {
        let text = "é".repeat(150);
        let response = DiagnosticResponse::connected(&text);
        let sample = response.sample_response.unwrap();
        assert_eq!(sample.chars().count(), SAMPLE_PREVIEW_CHARS + 3);
        assert!(sample.ends_with("..."));
    }

    #[test]
    fn short_text_still_gets_ellipsis() {
        let response = DiagnosticResponse::connected("Hi");
        assert_eq!(response.sample_response.as_deref(), Some("Hi..."));
    }

    #[test]
    fn failure_omits_sample() {
        let body = serde_json::to_value(DiagnosticResponse::failed("boom")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "boom");
        assert!(body.get("sample_response").is_none());
    }
}
