//! Raw model output and its conversion to plain text.

use serde_json::{Map, Value};

/// Whatever a provider handed back, before interpretation.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCompletion {
    Text(String),
    Bytes(Vec<u8>),
    Sequence(Vec<RawCompletion>),
    Mapping(Map<String, Value>),
    Other(Value),
}

impl RawCompletion {
    /// Flatten the completion into a single string.
    ///
    /// - Text is trimmed.
    /// - Bytes are decoded as UTF-8 (lossy) and trimmed.
    /// - Sequences concatenate their normalized elements.
    /// - Mappings are serialized to JSON text.
    /// - Anything else is stringified and trimmed.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text.trim().to_string(),
            Self::Bytes(bytes) => String::from_utf8_lossy(&bytes).trim().to_string(),
            Self::Sequence(parts) => parts.into_iter().map(Self::into_text).collect(),
            Self::Mapping(map) => Value::Object(map).to_string(),
            Self::Other(Value::String(text)) => text.trim().to_string(),
            Self::Other(value) => value.to_string().trim().to_string(),
        }
    }
}

impl From<Value> for RawCompletion {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Mapping(map),
            other => Self::Other(other),
        }
    }
}

impl From<String> for RawCompletion {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}
