pub mod health;
pub mod recipes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /recipes                      list (q, page, page_size)
/// /recipes/parse                resolve by url
/// /recipes/convert              raw text to structured JSON (POST)
/// /recipes/sample               raw scrape of the sample page
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/recipes", recipes::router())
}
