//! Mock provider implementation for testing and local runs.

use super::{FinishReason, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

enum Outcome {
    Reply(String),
    Fail(ProviderError),
    Panic(String),
}

/// Mock text provider with a scripted outcome.
pub struct MockTextProvider {
    outcome: Outcome,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl MockTextProvider {
    /// Always answer with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Reply(text.into()))
    }

    /// Always fail with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self::with_outcome(Outcome::Fail(error))
    }

    /// Panic inside `generate`, as a buggy client library would.
    pub fn panicking(message: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Panic(message.into()))
    }

    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Number of `generate` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompt passed to the most recent `generate` call.
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Default for MockTextProvider {
    fn default() -> Self {
        Self::replying("# Mock lesson\n\n* This reply comes from the mock provider.")
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_prompt.lock() {
            *guard = Some(prompt.to_string());
        }

        let text = match &self.outcome {
            Outcome::Reply(text) => text.clone(),
            Outcome::Fail(error) => return Err(error.clone()),
            Outcome::Panic(message) => panic!("{}", message),
        };

        Ok(ProviderResponse {
            input_tokens: prompt.len() as i32 / 4,
            output_tokens: text.len() as i32 / 4,
            text,
            finish_reason: FinishReason::Complete,
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}
