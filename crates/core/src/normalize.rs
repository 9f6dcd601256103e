//! Field normalizers for scraped and generated recipe payloads.
//!
//! Every function here is total: unrecognized input degrades to an empty
//! value instead of failing. All of them are idempotent, so re-normalizing
//! a stored value is always a no-op.

use serde_json::Value;

/// Keys consulted, in priority order, when a description arrives as an object.
pub const DESCRIPTION_KEYS: &[&str] = &["text", "description", "value"];

/// Canonicalize a recipe URL for lookup and storage.
///
/// Trims surrounding whitespace and strips every trailing `/`, so
/// `https://example.com/recipe//` and `https://example.com/recipe` map to
/// the same stored record.
///
/// # Examples
///
/// ```
/// use scrapeme_core::normalize::normalize_recipe_url;
/// assert_eq!(normalize_recipe_url("  https://example.com/recipe/  "), "https://example.com/recipe");
/// assert_eq!(normalize_recipe_url("https://example.com/recipe//"), "https://example.com/recipe");
/// ```
pub fn normalize_recipe_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Convert an instructions payload into an ordered list of trimmed steps.
///
/// - Falsy input (null, `""`, `[]`, `{}`, `false`, `0`) yields no steps.
/// - A string is split on newlines (`\r\n` is treated as `\n`); lines are
///   trimmed and blank lines dropped.
/// - An array keeps only its string elements, trimmed, blanks dropped.
/// - Anything else yields no steps.
pub fn normalize_instructions(raw: &Value) -> Vec<String> {
    if is_falsy(raw) {
        return Vec::new();
    }

    match raw {
        Value::String(text) => {
            let unified = text.replace("\r\n", "\n");
            let steps: Vec<String> = unified
                .split('\n')
                .map(str::trim)
                .filter(|step| !step.is_empty())
                .map(str::to_string)
                .collect();

            if !steps.is_empty() {
                return steps;
            }

            let whole = text.trim();
            if whole.is_empty() {
                Vec::new()
            } else {
                vec![whole.to_string()]
            }
        }
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|step| !step.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Convert a description payload into plain trimmed text.
///
/// - Falsy input yields `""`.
/// - A string is trimmed.
/// - An object yields the first non-blank string among [`DESCRIPTION_KEYS`].
/// - An array normalizes each element recursively and joins the non-empty
///   results with a single space.
/// - Any other scalar is stringified and trimmed.
pub fn normalize_description(raw: &Value) -> String {
    if is_falsy(raw) {
        return String::new();
    }

    match raw {
        Value::String(text) => text.trim().to_string(),
        Value::Object(map) => DESCRIPTION_KEYS
            .iter()
            .filter_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .find(|text| !text.is_empty())
            .unwrap_or_default()
            .to_string(),
        Value::Array(items) => items
            .iter()
            .map(normalize_description)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        other => other.to_string().trim().to_string(),
    }
}

/// Whether a loosely-typed value counts as "empty" for normalization.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
