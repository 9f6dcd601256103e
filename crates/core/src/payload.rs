//! Coercion of untrusted scraper payloads into recipe fields.
//!
//! Scraper output differs per site. Each field is coerced on its own and a
//! malformed field degrades to an empty value rather than rejecting the
//! whole payload.

use serde_json::{Map, Value};

use crate::normalize::{is_falsy, normalize_description, normalize_instructions};

/// Characters that end a line in a free-text ingredients block.
const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}',
    '\u{2029}',
];

/// Recipe fields extracted from a scraper payload, ready to persist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapedRecipe {
    pub title: String,
    pub author: String,
    pub description: String,
    pub total_time: Option<i32>,
    pub yields: String,
    pub image: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

impl ScrapedRecipe {
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        let field = |key: &str| payload.get(key).unwrap_or(&Value::Null);

        Self {
            title: coerce_text(field("title")),
            author: coerce_text(field("author")),
            description: normalize_description(field("description")),
            total_time: coerce_total_time(field("total_time")),
            yields: coerce_text(field("yields")),
            image: coerce_text(field("image")),
            ingredients: coerce_ingredients(field("ingredients")),
            instructions: normalize_instructions(field("instructions")),
        }
    }
}

/// Coerce a scalar field to text. Missing and null values become `""`.
pub fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Coerce an ingredients payload.
///
/// A single string is split into trimmed, non-blank lines on any of
/// [`LINE_BREAKS`], so a lone `\r` separates lines too. An array is kept
/// in order without trimming; non-string elements are stringified so the
/// column stays a list of text. Anything else yields no ingredients.
pub fn coerce_ingredients(value: &Value) -> Vec<String> {
    if is_falsy(value) {
        return Vec::new();
    }

    match value {
        Value::String(text) => text
            .split(LINE_BREAKS)
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Array(items) => items.iter().map(coerce_text).collect(),
        _ => Vec::new(),
    }
}

/// Coerce a total time to whole minutes.
///
/// Integers and numeric strings are accepted, floats are truncated. Any
/// other shape, a negative value, or a value outside `i32` yields `None`.
pub fn coerce_total_time(value: &Value) -> Option<i32> {
    let minutes = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;

    i32::try_from(minutes).ok().filter(|m| *m >= 0)
}
