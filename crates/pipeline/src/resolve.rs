//! Scrape-and-persist: turn a recipe URL into a stored recipe.

use scrapeme_core::error::CoreError;
use scrapeme_core::normalize::normalize_recipe_url;
use scrapeme_core::payload::ScrapedRecipe;
use scrapeme_core::recipe_type::RecipeType;
use scrapeme_core::recipe_url::{validate_recipe_url, MISSING_URL_MESSAGE};
use scrapeme_db::models::recipe::{CreateRecipe, Recipe};
use scrapeme_db::repositories::RecipeRepo;
use scrapeme_scraper::{RecipeScraper, ScrapedPayload};
use sqlx::PgPool;

use crate::error::PipelineError;

/// Validate a raw `url` parameter and return its canonical form.
///
/// Absent or empty input is a missing parameter; anything that does not
/// canonicalize to an absolute HTTP(S) URL is invalid.
pub fn canonical_source_url(raw_url: Option<&str>) -> Result<String, CoreError> {
    let raw_url = raw_url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| CoreError::MissingParameter(MISSING_URL_MESSAGE.to_string()))?;

    let canonical = normalize_recipe_url(raw_url);
    validate_recipe_url(&canonical)?;
    Ok(canonical)
}

/// Return the stored recipe for `raw_url`, scraping and storing it on
/// first sight.
///
/// A stored recipe has its view counter bumped and is returned without
/// re-scraping. A new recipe is created with one view. When a concurrent
/// request stores the same URL first, that record is counted and returned
/// instead.
pub async fn resolve_recipe(
    pool: &PgPool,
    scraper: &dyn RecipeScraper,
    raw_url: Option<&str>,
) -> Result<Recipe, PipelineError> {
    let source_url = canonical_source_url(raw_url)?;

    if let Some(recipe) = RecipeRepo::increment_views_by_source_url(pool, &source_url).await? {
        tracing::debug!(%source_url, recipe_id = recipe.id, views = recipe.views, "Recipe cache hit");
        return Ok(recipe);
    }

    let payload = scraper.scrape(&source_url).await.map_err(|e| {
        tracing::warn!(%source_url, error = %e, "Recipe scrape failed");
        PipelineError::ScrapeFailed(e.to_string())
    })?;

    let input = create_from_payload(&source_url, &payload);

    if let Some(recipe) = RecipeRepo::insert_if_absent(pool, &input).await? {
        tracing::info!(%source_url, recipe_id = recipe.id, "Recipe scraped and stored");
        return Ok(recipe);
    }

    // Another request stored the URL between the lookup and the insert.
    RecipeRepo::increment_views_by_source_url(pool, &source_url)
        .await?
        .ok_or_else(|| {
            PipelineError::Core(CoreError::Internal(format!(
                "Recipe for {source_url} vanished after a conflicting insert"
            )))
        })
}

/// Scrape `raw_url` and return the raw payload without storing anything.
pub async fn scrape_preview(
    scraper: &dyn RecipeScraper,
    raw_url: Option<&str>,
) -> Result<ScrapedPayload, PipelineError> {
    let source_url = canonical_source_url(raw_url)?;

    scraper
        .scrape(&source_url)
        .await
        .map_err(|e| PipelineError::ScrapeFailed(e.to_string()))
}

fn create_from_payload(source_url: &str, payload: &ScrapedPayload) -> CreateRecipe {
    let fields = ScrapedRecipe::from_payload(payload);

    CreateRecipe {
        source_url: Some(source_url.to_string()),
        recipe_type: Some(RecipeType::Url),
        title: fields.title,
        author: fields.author,
        description: fields.description,
        total_time: fields.total_time,
        yields: fields.yields,
        image: fields.image,
        ingredients: fields.ingredients,
        instructions: fields.instructions,
        views: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use scrapeme_core::recipe_url::INVALID_URL_MESSAGE;
    use serde_json::json;

    #[test]
    fn missing_url_is_rejected() {
        assert_matches!(
            canonical_source_url(None),
            Err(CoreError::MissingParameter(msg)) if msg == MISSING_URL_MESSAGE
        );
        assert_matches!(
            canonical_source_url(Some("")),
            Err(CoreError::MissingParameter(_))
        );
    }

    #[test]
    fn invalid_urls_are_rejected() {
        for raw in ["   ", "not a url", "ftp://example.com/recipe", "/recipe/1"] {
            assert_matches!(
                canonical_source_url(Some(raw)),
                Err(CoreError::InvalidUrl(msg)) if msg == INVALID_URL_MESSAGE,
                "{raw:?} should be invalid"
            );
        }
    }

    #[test]
    fn url_is_canonicalized() {
        assert_eq!(
            canonical_source_url(Some("  https://example.com/recipe//  ")).unwrap(),
            "https://example.com/recipe"
        );
    }

    #[test]
    fn payload_maps_to_url_recipe_with_one_view() {
        let payload = json!({
            "title": "Soup",
            "ingredients": "1 onion\n\n 2 carrots ",
            "instructions": ["  Chop.  ", "", "Simmer."],
            "description": {"text": "  Warm.  "},
            "total_time": "forty",
            "host": "example.com",
        });
        let input = create_from_payload(
            "https://example.com/soup",
            payload.as_object().unwrap(),
        );

        assert_eq!(input.source_url.as_deref(), Some("https://example.com/soup"));
        assert_eq!(input.resolved_type(), RecipeType::Url);
        assert_eq!(input.views, 1);
        assert_eq!(input.title, "Soup");
        assert_eq!(input.author, "");
        assert_eq!(input.ingredients, vec!["1 onion", "2 carrots"]);
        assert_eq!(input.instructions, vec!["Chop.", "Simmer."]);
        assert_eq!(input.description, "Warm.");
        assert_eq!(input.total_time, None);
    }
}
