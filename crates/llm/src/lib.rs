//! Generative-inference provider abstraction.
//!
//! Providers take a system prompt plus a prompt body and return whatever
//! the model produced as a [`RawCompletion`]. Interpreting that output is
//! the caller's job.

mod completion;
mod fake;
mod openai;
mod prompt;

pub use completion::RawCompletion;
pub use fake::{FakeProvider, RecordedRequest};
pub use openai::OpenAiProvider;
pub use prompt::SystemPrompt;

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Error type for inference operations.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The upstream service could not be reached or refused the call.
    #[error("{0}")]
    Unavailable(String),

    #[error("Inference API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse inference response: {0}")]
    ParseError(String),

    #[error("Inference provider not configured: {0}")]
    NotConfigured(String),

    #[error("Failed to load system prompt from {path}: {message}")]
    PromptLoad { path: String, message: String },
}

/// Generation settings: the smallest reasoning effort and terse output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InferenceOptions {
    pub reasoning_effort: String,
    pub verbosity: String,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            reasoning_effort: "minimal".to_string(),
            verbosity: "low".to_string(),
        }
    }
}

/// A single stateless inference call. There is no conversation history.
#[derive(Debug, Clone)]
pub struct InferenceRequest<'a> {
    pub system_prompt: &'a str,
    pub prompt_body: &'a str,
    pub options: InferenceOptions,
}

/// Trait for inference providers.
///
/// Implementations should be stateless and thread-safe.
#[async_trait]
pub trait InferenceProvider: Send + Sync + fmt::Debug {
    /// Run one inference call and return the model's raw output.
    async fn infer(&self, request: &InferenceRequest<'_>) -> Result<RawCompletion, LlmError>;

    /// Provider name (e.g. "openai", "fake").
    fn provider_name(&self) -> &'static str;

    /// Model name (e.g. "gpt-5-mini").
    fn model_name(&self) -> &str;
}

/// Create the provider selected by the environment.
///
/// - `INFERENCE_PROVIDER`: `"openai"` (default) | `"fake"`
/// - `INFERENCE_MODEL`, `INFERENCE_BASE_URL`, `OPENAI_API_KEY`: see [`OpenAiProvider::from_env`]
pub fn create_provider_from_env() -> Result<Box<dyn InferenceProvider>, LlmError> {
    let provider = std::env::var("INFERENCE_PROVIDER").unwrap_or_else(|_| "openai".to_string());

    match provider.as_str() {
        "openai" => Ok(Box::new(OpenAiProvider::from_env())),
        "fake" => Ok(Box::new(FakeProvider::default())),
        other => Err(LlmError::NotConfigured(format!(
            "Unknown inference provider: {other}"
        ))),
    }
}
