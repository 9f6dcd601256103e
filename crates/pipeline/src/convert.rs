//! Raw-text conversion: free recipe text in, model-structured JSON out.
//!
//! The converter validates the request, sends `{source_url, raw_text}` to the
//! inference provider under a fixed system prompt and hands back whatever
//! JSON object the model produced. The object is not checked against the
//! recipe schema.

use std::sync::Arc;

use scrapeme_core::error::CoreError;
use scrapeme_llm::{InferenceOptions, InferenceProvider, InferenceRequest, SystemPrompt};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::PipelineError;

pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON body.";
pub const MISSING_RAW_TEXT_MESSAGE: &str = "Field 'raw_text' is required.";

/// Failures interpreting or obtaining the model's output.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Inference service returned an empty response.")]
    EmptyResponse,

    #[error("Inference service returned a response that is not valid JSON.")]
    MalformedResponse,

    #[error("Inference service returned JSON that is not an object.")]
    UnexpectedShape,

    /// The provider itself failed: missing credentials, missing prompt,
    /// transport or API errors.
    #[error("{0}")]
    UpstreamUnavailable(String),
}

/// A validated conversion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertRequest {
    pub source_url: Option<String>,
    pub raw_text: String,
}

impl ConvertRequest {
    /// Parse a request body. Anything other than a JSON object is rejected.
    pub fn parse(body: &[u8]) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|_| CoreError::InvalidParameter(INVALID_JSON_MESSAGE.to_string()))?;

        match value {
            Value::Object(fields) => Self::from_fields(&fields),
            _ => Err(CoreError::InvalidParameter(INVALID_JSON_MESSAGE.to_string())),
        }
    }

    /// Validate the fields of an already-decoded body.
    ///
    /// `raw_text` must be a non-blank string and is kept as given.
    /// `source_url` is trimmed; empty or null means absent, and non-string
    /// values are stringified as JSON text (`true`, `{"a":1}`).
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, CoreError> {
        let raw_text = match fields.get("raw_text") {
            Some(Value::String(text)) if !text.trim().is_empty() => text.clone(),
            _ => {
                return Err(CoreError::MissingParameter(
                    MISSING_RAW_TEXT_MESSAGE.to_string(),
                ))
            }
        };

        let source_url = match fields.get("source_url") {
            None | Some(Value::Null) => None,
            Some(Value::String(url)) => Some(url.trim().to_string()),
            Some(other) => Some(other.to_string().trim().to_string()),
        }
        .filter(|url| !url.is_empty());

        Ok(Self {
            source_url,
            raw_text,
        })
    }

    /// The JSON prompt body sent to the model.
    pub fn prompt_body(&self) -> String {
        serde_json::json!({
            "source_url": self.source_url,
            "raw_text": self.raw_text,
        })
        .to_string()
    }
}

/// Interpret normalized model output as a JSON object.
pub fn parse_structured_output(text: &str) -> Result<Map<String, Value>, ConversionError> {
    if text.is_empty() {
        return Err(ConversionError::EmptyResponse);
    }

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ConversionError::UnexpectedShape),
        Err(_) => Err(ConversionError::MalformedResponse),
    }
}

/// Converts free recipe text into structured JSON via an inference provider.
#[derive(Debug, Clone)]
pub struct RecipeConverter {
    provider: Arc<dyn InferenceProvider>,
    system_prompt: Option<SystemPrompt>,
}

impl RecipeConverter {
    /// `system_prompt` is loaded once at startup. Without one every
    /// conversion fails as upstream-unavailable.
    pub fn new(provider: Arc<dyn InferenceProvider>, system_prompt: Option<SystemPrompt>) -> Self {
        Self {
            provider,
            system_prompt,
        }
    }

    pub fn provider(&self) -> &dyn InferenceProvider {
        self.provider.as_ref()
    }

    pub async fn convert(&self, request: &ConvertRequest) -> Result<Map<String, Value>, PipelineError> {
        let system_prompt = self.system_prompt.as_ref().ok_or_else(|| {
            ConversionError::UpstreamUnavailable("System prompt is not configured.".to_string())
        })?;

        let prompt_body = request.prompt_body();
        let inference = InferenceRequest {
            system_prompt: system_prompt.as_str(),
            prompt_body: &prompt_body,
            options: InferenceOptions::default(),
        };

        let completion = self.provider.infer(&inference).await.map_err(|e| {
            tracing::warn!(
                provider = self.provider.provider_name(),
                model = self.provider.model_name(),
                error = %e,
                "Inference call failed",
            );
            ConversionError::UpstreamUnavailable(e.to_string())
        })?;

        let text = completion.into_text();
        let structured = parse_structured_output(&text).inspect_err(|e| {
            tracing::warn!(error = %e, chars = text.len(), "Unusable inference output");
        })?;

        tracing::info!(
            source_url = request.source_url.as_deref().unwrap_or_default(),
            keys = structured.len(),
            "Converted raw recipe text",
        );

        Ok(structured)
    }
}
