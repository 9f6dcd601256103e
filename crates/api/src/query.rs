//! Query parameter types for API handlers.
//!
//! Values are kept as raw strings so validation can report its own
//! messages instead of a generic extractor rejection.

use serde::Deserialize;

/// `GET /recipes?q=&page=&page_size=`
#[derive(Debug, Default, Deserialize)]
pub struct RecipeListParams {
    pub q: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// `GET /recipes/parse?url=`
#[derive(Debug, Default, Deserialize)]
pub struct RecipeUrlParams {
    pub url: Option<String>,
}
