//! CV analysis, the AI half of each request.
//!
//! `AppState` holds an `Arc<dyn CvAnalyst>`, picked at startup:
//! `GeminiAnalyst` when an API key is configured, `DisabledAnalyst` otherwise.
//! Either way the deterministic ATS score is returned; a failed analysis only
//! swaps in a placeholder message.

use async_trait::async_trait;
use tracing::warn;

use crate::llm_client::{GeminiClient, LlmError};

pub mod handlers;
pub mod prompts;

/// The analysis backend trait. Implement this to swap AI providers without
/// touching the handlers.
#[async_trait]
pub trait CvAnalyst: Send + Sync {
    /// Free-form review of a single résumé.
    async fn analyze(&self, cv_text: &str) -> Result<String, LlmError>;

    /// Free-form comparison of a résumé against a job description.
    async fn compare(&self, cv_text: &str, job_description: &str) -> Result<String, LlmError>;

    /// Short label for health output and logs.
    fn backend(&self) -> &'static str;
}

pub struct GeminiAnalyst(pub GeminiClient);

#[async_trait]
impl CvAnalyst for GeminiAnalyst {
    async fn analyze(&self, cv_text: &str) -> Result<String, LlmError> {
        self.0
            .generate(&prompts::analysis_prompt(cv_text), prompts::REVIEWER_SYSTEM)
            .await
    }

    async fn compare(&self, cv_text: &str, job_description: &str) -> Result<String, LlmError> {
        self.0
            .generate(
                &prompts::comparison_prompt(cv_text, job_description),
                prompts::REVIEWER_SYSTEM,
            )
            .await
    }

    fn backend(&self) -> &'static str {
        "gemini"
    }
}

/// Used when no API key is configured. Every call fails with `NotConfigured`.
pub struct DisabledAnalyst;

#[async_trait]
impl CvAnalyst for DisabledAnalyst {
    async fn analyze(&self, _cv_text: &str) -> Result<String, LlmError> {
        Err(LlmError::NotConfigured)
    }

    async fn compare(&self, _cv_text: &str, _job_description: &str) -> Result<String, LlmError> {
        Err(LlmError::NotConfigured)
    }

    fn backend(&self) -> &'static str {
        "disabled"
    }
}

/// Unwraps an analysis result, logging the failure and substituting the
/// placeholder text.
pub fn or_placeholder(result: Result<String, LlmError>) -> String {
    result.unwrap_or_else(|e| {
        warn!("AI analysis failed, returning placeholder: {e}");
        prompts::ANALYSIS_UNAVAILABLE.to_string()
    })
}
