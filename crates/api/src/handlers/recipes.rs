//! Handlers for recipe lookup, listing, and raw-text conversion.

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use scrapeme_pipeline::{list_recipes, resolve_recipe, scrape_preview, ConvertRequest};

use crate::error::{AppError, AppResult};
use crate::query::{RecipeListParams, RecipeUrlParams};
use crate::state::AppState;

/// GET /api/v1/recipes
///
/// Paginated listing, newest first, optionally filtered by title (`q`).
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<RecipeListParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let page = list_recipes(
        &state.pool,
        params.q.as_deref(),
        params.page.as_deref(),
        params.page_size.as_deref(),
    )
    .await?;

    Ok(Json(page))
}

/// GET /api/v1/recipes/parse?url=
///
/// Return the stored recipe for `url`, scraping it on first request.
pub async fn parse(
    State(state): State<AppState>,
    params: Result<Query<RecipeUrlParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let recipe = resolve_recipe(&state.pool, state.scraper.as_ref(), params.url.as_deref()).await?;

    Ok(Json(recipe))
}

/// POST /api/v1/recipes/convert
///
/// Body `{raw_text, source_url?}`. Decoded by hand so every malformed body
/// gets the same 400, whatever its content type.
pub async fn convert(State(state): State<AppState>, body: Bytes) -> AppResult<impl IntoResponse> {
    let request = ConvertRequest::parse(&body)?;
    let structured = state.converter.convert(&request).await?;

    Ok(Json(structured))
}

/// GET /api/v1/recipes/sample
///
/// Scrape the configured sample page and return the raw payload. Nothing
/// is stored.
pub async fn sample(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let payload = scrape_preview(
        state.scraper.as_ref(),
        Some(state.config.sample_recipe_url.as_str()),
    )
    .await?;

    Ok(Json(payload))
}
