//! System prompt document, loaded once at startup.

use std::path::Path;
use std::sync::Arc;

use crate::LlmError;

/// Immutable system prompt text.
///
/// Cheap to clone; every clone shares the same buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPrompt(Arc<str>);

impl SystemPrompt {
    /// Read the prompt document at `path`. Empty documents are rejected.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LlmError> {
        let path = path.as_ref();
        let load_error = |message: String| LlmError::PromptLoad {
            path: path.display().to_string(),
            message,
        };

        let text = std::fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        if text.trim().is_empty() {
            return Err(load_error("prompt document is empty".to_string()));
        }

        tracing::info!(path = %path.display(), chars = text.len(), "Loaded system prompt");
        Ok(Self(Arc::from(text)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SystemPrompt {
    fn from(text: &str) -> Self {
        Self(Arc::from(text))
    }
}
