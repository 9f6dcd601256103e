//! Validation of canonical recipe source URLs.

use url::Url;

use crate::error::CoreError;

/// Error message returned when the `url` parameter is absent or empty.
pub const MISSING_URL_MESSAGE: &str = "Missing required 'url' query parameter.";

/// Error message returned when the `url` parameter is not an absolute HTTP(S) URL.
pub const INVALID_URL_MESSAGE: &str = "Invalid URL provided.";

/// URL schemes a recipe may be scraped from.
pub const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

/// Check that an already-normalized URL is absolute, uses `http`/`https`
/// and has a non-empty host.
///
/// The authority must be written out as `scheme://host`. Forms a WHATWG
/// parser would repair, such as `https:example.com` or `https:\\example.com`,
/// are invalid.
pub fn validate_recipe_url(url: &str) -> Result<Url, CoreError> {
    let invalid = || CoreError::InvalidUrl(INVALID_URL_MESSAGE.to_string());

    if written_authority(url).is_none() {
        return Err(invalid());
    }

    let parsed = Url::parse(url).map_err(|_| invalid())?;

    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return Err(invalid());
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(invalid()),
    }
}

/// The authority as written between `scheme://` and the first `/`, `?` or
/// `#`. `None` when the `//` is missing or the authority is empty.
fn written_authority(url: &str) -> Option<&str> {
    let (_scheme, rest) = url.split_once(':')?;
    let rest = rest.strip_prefix("//")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some(&rest[..end]).filter(|authority| !authority.is_empty())
}
