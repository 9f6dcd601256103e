//! schema.org `Recipe` extraction from JSON-LD script tags.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{json, Map, Value};

use crate::duration::parse_iso_minutes;
use crate::{ScrapeError, ScrapedPayload};

/// Regex to find JSON-LD script tags (case-insensitive for type attribute)
static JSONLD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script[^>]*type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#)
        .expect("Invalid JSON-LD regex")
});

/// Regex to find a `<link rel="canonical">` href.
static CANONICAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<link[^>]*rel\s*=\s*["']canonical["'][^>]*href\s*=\s*["']([^"']+)["']"#)
        .expect("Invalid canonical link regex")
});

/// Build a scraper payload from a page's HTML.
///
/// The first JSON-LD node typed `Recipe` wins. Keys produced: `title`,
/// `author`, `total_time`, `yields`, `image`, `ingredients`,
/// `instructions`, `description`, `host`, `canonical_url`, `category`,
/// `cuisine`.
pub fn payload_from_html(html: &str, page_url: &str) -> Result<ScrapedPayload, ScrapeError> {
    let recipe = find_recipe_node(html).ok_or_else(|| ScrapeError::NoRecipe(page_url.to_string()))?;

    let mut payload = Map::new();
    payload.insert("title".into(), json!(first_text(recipe.get("name")).unwrap_or_default()));
    payload.insert("author".into(), json!(author_name(recipe.get("author")).unwrap_or_default()));
    payload.insert("total_time".into(), total_time(&recipe));
    payload.insert("yields".into(), json!(yields(recipe.get("recipeYield")).unwrap_or_default()));
    payload.insert("image".into(), json!(image_url(recipe.get("image")).unwrap_or_default()));
    payload.insert(
        "ingredients".into(),
        recipe
            .get("recipeIngredient")
            .or_else(|| recipe.get("ingredients"))
            .cloned()
            .unwrap_or_else(|| json!([])),
    );
    payload.insert("instructions".into(), json!(instructions_text(recipe.get("recipeInstructions"))));
    payload.insert(
        "description".into(),
        recipe.get("description").cloned().unwrap_or(Value::Null),
    );

    payload.insert("host".into(), json!(host_of(page_url)));
    payload.insert(
        "canonical_url".into(),
        json!(canonical_url(html).unwrap_or_else(|| page_url.to_string())),
    );
    payload.insert("category".into(), json!(first_text(recipe.get("recipeCategory"))));
    payload.insert("cuisine".into(), json!(first_text(recipe.get("recipeCuisine"))));

    Ok(payload)
}

fn find_recipe_node(html: &str) -> Option<Value> {
    JSONLD_REGEX.captures_iter(html).find_map(|cap| {
        let sanitized = sanitize_json(cap.get(1)?.as_str());
        let json: Value = serde_json::from_str(&sanitized).ok()?;
        find_recipe_in_json(&json).cloned()
    })
}

/// Escape raw control characters some sites leave inside JSON strings.
fn sanitize_json(json: &str) -> String {
    let mut result = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in json.chars() {
        if in_string {
            match c {
                _ if escaped => {
                    escaped = false;
                    result.push(c);
                }
                '\\' => {
                    escaped = true;
                    result.push(c);
                }
                '"' => {
                    in_string = false;
                    result.push(c);
                }
                '\n' => result.push_str("\\n"),
                '\r' => result.push_str("\\r"),
                '\t' => result.push_str("\\t"),
                c if c.is_control() => {}
                _ => result.push(c),
            }
        } else {
            if c == '"' {
                in_string = true;
            }
            result.push(c);
        }
    }

    result
}

/// Recursively search for a `Recipe` object, including inside `@graph`.
fn find_recipe_in_json(json: &Value) -> Option<&Value> {
    match json {
        Value::Object(obj) => {
            let is_recipe = match obj.get("@type") {
                Some(Value::String(s)) => s == "Recipe",
                Some(Value::Array(types)) => types.iter().any(|t| t == "Recipe"),
                _ => false,
            };
            if is_recipe {
                return Some(json);
            }
            obj.values().find_map(find_recipe_in_json)
        }
        Value::Array(items) => items.iter().find_map(find_recipe_in_json),
        _ => None,
    }
}

/// First non-empty string in a string-or-array value.
fn first_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Array(items) => items.iter().find_map(|item| first_text(Some(item))),
        _ => None,
    }
}

/// Author as a plain name: a string, a `Person` object, or a list of either.
fn author_name(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Object(obj) => first_text(obj.get("name")),
        Value::Array(items) => items.iter().find_map(|item| author_name(Some(item))),
        other => first_text(Some(other)),
    }
}

/// `totalTime`, else `prepTime + cookTime`, in minutes.
///
/// An unparseable `totalTime` is passed through as-is; downstream coercion
/// decides what to do with it.
fn total_time(recipe: &Value) -> Value {
    let minutes_of = |key: &str| recipe.get(key).and_then(Value::as_str).and_then(parse_iso_minutes);

    if let Some(total) = minutes_of("totalTime") {
        return json!(total);
    }

    match (minutes_of("prepTime"), minutes_of("cookTime")) {
        (None, None) => recipe.get("totalTime").cloned().unwrap_or(Value::Null),
        (prep, cook) => json!(prep.unwrap_or(0) + cook.unwrap_or(0)),
    }
}

fn yields(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Number(n) => Some(format!("{n} servings")),
        Value::Array(items) => items.iter().find_map(|item| yields(Some(item))),
        other => first_text(Some(other)),
    }
}

fn image_url(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(|item| image_url(Some(item))),
        Value::Object(obj) => obj.get("url").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// Flatten `recipeInstructions` to newline-separated text.
///
/// Handles plain strings, `HowToStep` objects and `HowToSection`s with an
/// `itemListElement` list.
fn instructions_text(value: Option<&Value>) -> String {
    let mut steps = Vec::new();
    if let Some(value) = value {
        collect_steps(value, &mut steps);
    }
    steps.join("\n")
}

fn collect_steps(value: &Value, steps: &mut Vec<String>) {
    match value {
        Value::String(s) => steps.push(s.trim().to_string()),
        Value::Array(items) => items.iter().for_each(|item| collect_steps(item, steps)),
        Value::Object(obj) => {
            if let Some(list) = obj.get("itemListElement") {
                collect_steps(list, steps);
            } else if let Some(text) = obj.get("text").and_then(Value::as_str) {
                steps.push(text.trim().to_string());
            }
        }
        _ => {}
    }
}

fn host_of(page_url: &str) -> String {
    url::Url::parse(page_url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.strip_prefix("www.").unwrap_or(h).to_string()))
        .unwrap_or_default()
}

fn canonical_url(html: &str) -> Option<String> {
    CANONICAL_REGEX
        .captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}
