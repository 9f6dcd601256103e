use std::sync::Arc;

use scrapeme_pipeline::RecipeConverter;
use scrapeme_scraper::RecipeScraper;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: scrapeme_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Recipe page scraper.
    pub scraper: Arc<dyn RecipeScraper>,
    /// Raw-text converter with its provider and system prompt.
    pub converter: Arc<RecipeConverter>,
}
