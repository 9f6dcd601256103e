//! OpenAI Responses API provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{InferenceProvider, InferenceRequest, LlmError, RawCompletion};

/// Default model when `INFERENCE_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gpt-5-mini";

/// Default API root when `INFERENCE_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI provider using the `/responses` endpoint.
#[derive(Debug)]
pub struct OpenAiProvider {
    api_key: Option<String>,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(api_key: Option<String>, model: String, base_url: String) -> Self {
        Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Build from `OPENAI_API_KEY`, `INFERENCE_MODEL`, and `INFERENCE_BASE_URL`.
    ///
    /// A missing key is not an error here; calls fail with
    /// [`LlmError::NotConfigured`] until one is provided.
    pub fn from_env() -> Self {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let model = std::env::var("INFERENCE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        let base_url =
            std::env::var("INFERENCE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        if api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY is not set; recipe conversion will fail");
        }

        Self::new(api_key, model, base_url)
    }

    fn build_request<'a>(&'a self, request: &'a InferenceRequest<'_>) -> ResponsesRequest<'a> {
        ResponsesRequest {
            model: &self.model,
            instructions: request.system_prompt,
            input: request.prompt_body,
            reasoning: Reasoning {
                effort: &request.options.reasoning_effort,
            },
            text: TextSettings {
                verbosity: &request.options.verbosity,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    instructions: &'a str,
    input: &'a str,
    reasoning: Reasoning<'a>,
    text: TextSettings<'a>,
}

#[derive(Debug, Serialize)]
struct Reasoning<'a> {
    effort: &'a str,
}

#[derive(Debug, Serialize)]
struct TextSettings<'a> {
    verbosity: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Pull the model output out of a `/responses` body.
///
/// Prefers the `output_text` convenience field; otherwise collects every
/// `output_text` content part across the `output` items.
pub(crate) fn completion_from_response(body: Value) -> Result<RawCompletion, LlmError> {
    if let Some(text) = body.get("output_text").filter(|v| !v.is_null()) {
        return Ok(RawCompletion::from(text.clone()));
    }

    let output = body
        .get("output")
        .and_then(Value::as_array)
        .ok_or_else(|| LlmError::ParseError("No output in response".to_string()))?;

    let parts: Vec<RawCompletion> = output
        .iter()
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .filter(|part| part.get("type").and_then(Value::as_str) == Some("output_text"))
        .filter_map(|part| part.get("text"))
        .map(|text| RawCompletion::from(text.clone()))
        .collect();

    Ok(RawCompletion::Sequence(parts))
}

#[async_trait]
impl InferenceProvider for OpenAiProvider {
    async fn infer(&self, request: &InferenceRequest<'_>) -> Result<RawCompletion, LlmError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::NotConfigured("OPENAI_API_KEY is not set".to_string()))?;

        let url = format!("{}/responses", self.base_url);
        tracing::debug!(model = %self.model, prompt_chars = request.prompt_body.len(), "Sending inference request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&self.build_request(request))
            .send()
            .await
            .map_err(|e| LlmError::Unavailable(format!("Inference request failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Unavailable(format!("Inference request failed: {e}")))?;

        if status != 200 {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|parsed| parsed.error.message)
                .unwrap_or(body);
            return Err(LlmError::ApiError { status, message });
        }

        let body: Value =
            serde_json::from_str(&body).map_err(|e| LlmError::ParseError(e.to_string()))?;
        completion_from_response(body)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
