//! Fake inference provider for testing.
//!
//! Returns a scripted completion (or failure) without network access and
//! records every request it receives.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::{InferenceOptions, InferenceProvider, InferenceRequest, LlmError, RawCompletion};

/// A request as seen by [`FakeProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub system_prompt: String,
    pub prompt_body: String,
    pub options: InferenceOptions,
}

#[derive(Debug)]
enum Outcome {
    Completion(RawCompletion),
    Failure(String),
}

/// A scripted inference provider for tests.
#[derive(Debug)]
pub struct FakeProvider {
    outcome: Outcome,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl Default for FakeProvider {
    /// A provider that answers every request with an empty JSON object.
    fn default() -> Self {
        Self::with_completion(RawCompletion::Text("{}".to_string()))
    }
}

impl FakeProvider {
    pub fn with_completion(completion: RawCompletion) -> Self {
        Self {
            outcome: Outcome::Completion(completion),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fail every request with [`LlmError::Unavailable`] carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Outcome::Failure(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl InferenceProvider for FakeProvider {
    async fn infer(&self, request: &InferenceRequest<'_>) -> Result<RawCompletion, LlmError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                system_prompt: request.system_prompt.to_string(),
                prompt_body: request.prompt_body.to_string(),
                options: request.options.clone(),
            });
        }

        match &self.outcome {
            Outcome::Completion(completion) => Ok(completion.clone()),
            Outcome::Failure(message) => Err(LlmError::Unavailable(message.clone())),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
