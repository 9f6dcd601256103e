//! Search and paginate stored recipes.

use scrapeme_core::pagination::{PageRequest, Pagination};
use scrapeme_db::models::recipe::Recipe;
use scrapeme_db::repositories::RecipeRepo;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::PipelineError;

/// One page of recipes plus the query that produced it.
#[derive(Debug, Serialize)]
pub struct RecipePage {
    /// The trimmed title filter (`""` when none was given).
    pub query: String,
    pub results: Vec<Recipe>,
    pub pagination: Pagination,
}

/// List recipes newest first, optionally filtered by title.
///
/// `page` and `page_size` are the raw query values; they are validated
/// before the database is touched.
pub async fn list_recipes(
    pool: &PgPool,
    query: Option<&str>,
    page: Option<&str>,
    page_size: Option<&str>,
) -> Result<RecipePage, PipelineError> {
    let request = PageRequest::parse(page, page_size)?;

    let query = query.map(str::trim).unwrap_or_default();
    let title_filter = Some(query).filter(|q| !q.is_empty());

    let total_items = RecipeRepo::count(pool, title_filter).await?;
    let results =
        RecipeRepo::list(pool, title_filter, request.page_size, request.offset()).await?;

    tracing::debug!(
        query,
        page = request.page,
        page_size = request.page_size,
        total_items,
        "Listed recipes",
    );

    Ok(RecipePage {
        query: query.to_string(),
        results,
        pagination: Pagination::new(request, total_items),
    })
}
