//! Generative model provider abstraction.
//!
//! The relay talks to exactly one provider per process. The handle is built
//! at startup and shared read-only across requests as `Arc<dyn TextProvider>`.

pub mod gemini;
pub mod mock;

use crate::services::metrics::{record_provider_error, record_provider_latency, record_tokens};
use async_trait::async_trait;
use std::time::Instant;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Content filtered by safety settings: {0}")]
    ContentFiltered(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// User-facing category of a provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    Configuration,
    Quota,
    Safety,
    Generic,
}

impl ProviderErrorKind {
    /// Message shown to callers for this category.
    pub fn user_message(self) -> &'static str {
        match self {
            ProviderErrorKind::Configuration => {
                "API configuration error. Please check the server configuration."
            }
            ProviderErrorKind::Quota => "API quota exceeded. Please try again later.",
            ProviderErrorKind::Safety => {
                "Content filtered for safety. Please rephrase your question."
            }
            ProviderErrorKind::Generic => {
                "Sorry, I encountered an error while processing your request."
            }
        }
    }

    /// Metric label.
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderErrorKind::Configuration => "configuration",
            ProviderErrorKind::Quota => "quota",
            ProviderErrorKind::Safety => "safety",
            ProviderErrorKind::Generic => "generic",
        }
    }
}

impl ProviderError {
    /// Classify the failure.
    ///
    /// Structured variants win; anything else is matched on the provider's
    /// message, checking credentials, then quota, then safety.
    pub fn kind(&self) -> ProviderErrorKind {
        match self {
            ProviderError::NotConfigured(_) => ProviderErrorKind::Configuration,
            ProviderError::RateLimited(_) => ProviderErrorKind::Quota,
            ProviderError::ContentFiltered(_) => ProviderErrorKind::Safety,
            ProviderError::ApiError(msg)
            | ProviderError::InvalidRequest(msg)
            | ProviderError::NetworkError(msg) => classify_message(msg),
        }
    }

    pub fn user_message(&self) -> &'static str {
        self.kind().user_message()
    }
}

fn classify_message(message: &str) -> ProviderErrorKind {
    if message.contains("API key") {
        ProviderErrorKind::Configuration
    } else if message.contains("quota") {
        ProviderErrorKind::Quota
    } else if message.contains("safety") {
        ProviderErrorKind::Safety
    } else {
        ProviderErrorKind::Generic
    }
}

/// Result of a provider call.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Full generated text.
    pub text: String,

    /// Input tokens consumed.
    pub input_tokens: i32,

    /// Output tokens generated.
    pub output_tokens: i32,

    /// Finish reason.
    pub finish_reason: FinishReason,
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
    Other,
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Send one prompt and wait for the complete response. No retries.
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError>;

    /// Provider label for logs and metrics.
    fn name(&self) -> &'static str;

    /// Model identifier for logs and metrics.
    fn model(&self) -> &str;
}

/// Call the provider once, logging and recording latency, tokens and
/// failures.
pub async fn generate_observed(
    provider: &dyn TextProvider,
    prompt: &str,
) -> Result<ProviderResponse, ProviderError> {
    let start = Instant::now();
    let result = provider.generate(prompt).await;
    let elapsed = start.elapsed().as_secs_f64();

    record_provider_latency(provider.name(), provider.model(), elapsed);

    match &result {
        Ok(response) => {
            record_tokens(provider.model(), response.input_tokens, response.output_tokens);
            tracing::info!(
                provider = provider.name(),
                model = %provider.model(),
                input_tokens = response.input_tokens,
                output_tokens = response.output_tokens,
                finish_reason = ?response.finish_reason,
                elapsed_secs = elapsed,
                "Provider call completed"
            );
        }
        Err(e) => {
            let kind = e.kind();
            record_provider_error(provider.name(), kind.as_str());
            tracing::error!(
                provider = provider.name(),
                model = %provider.model(),
                error = %e,
                kind = kind.as_str(),
                elapsed_secs = elapsed,
                "Provider call failed"
            );
        }
    }

    result
}
