//! Repository for the `recipes` table.
//!
//! The unique constraint on `source_url` is what keeps at most one stored
//! copy per source page; the view counter is only ever bumped in SQL.

use sqlx::PgPool;

use crate::models::recipe::{CreateRecipe, Recipe};

/// Column list for `recipes` queries.
const COLUMNS: &str = "\
    id, source_url, description, title, author, total_time, yields, image, \
    ingredients, instructions, views, recipe_type, created_at, updated_at";

/// Column list for inserts (everything server-assigned is omitted).
const INSERT_COLUMNS: &str = "\
    source_url, recipe_type, title, author, description, total_time, yields, \
    image, ingredients, instructions, views";

/// Provides persistence operations for recipes.
pub struct RecipeRepo;

impl RecipeRepo {
    /// Insert a new recipe, returning the created row.
    ///
    /// Fails with a unique violation on `uq_recipes_source_url` if the URL
    /// is already stored.
    pub async fn create(pool: &PgPool, input: &CreateRecipe) -> Result<Recipe, sqlx::Error> {
        let query = format!(
            "INSERT INTO recipes ({INSERT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        bind_create(sqlx::query_as::<_, Recipe>(&query), input)
            .fetch_one(pool)
            .await
    }

    /// Insert a recipe unless its `source_url` is already stored.
    ///
    /// Returns `None` when a concurrent writer inserted the same URL first.
    pub async fn insert_if_absent(
        pool: &PgPool,
        input: &CreateRecipe,
    ) -> Result<Option<Recipe>, sqlx::Error> {
        let query = format!(
            "INSERT INTO recipes ({INSERT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             ON CONFLICT (source_url) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let inserted = bind_create(sqlx::query_as::<_, Recipe>(&query), input)
            .fetch_optional(pool)
            .await?;

        if inserted.is_none() {
            tracing::debug!(
                source_url = input.source_url.as_deref().unwrap_or_default(),
                "Recipe insert skipped, source_url already stored",
            );
        }

        Ok(inserted)
    }

    /// Find a recipe by its canonical source URL without touching counters.
    pub async fn find_by_source_url(
        pool: &PgPool,
        source_url: &str,
    ) -> Result<Option<Recipe>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recipes WHERE source_url = $1");
        sqlx::query_as::<_, Recipe>(&query)
            .bind(source_url)
            .fetch_optional(pool)
            .await
    }

    /// Record a view of the recipe stored under `source_url`.
    ///
    /// The increment is a single statement so concurrent lookups of the same
    /// URL never lose a view. Returns the updated row, or `None` if the URL
    /// is not stored.
    pub async fn increment_views_by_source_url(
        pool: &PgPool,
        source_url: &str,
    ) -> Result<Option<Recipe>, sqlx::Error> {
        let query = format!(
            "UPDATE recipes SET views = views + 1, updated_at = NOW() \
             WHERE source_url = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recipe>(&query)
            .bind(source_url)
            .fetch_optional(pool)
            .await
    }

    /// List recipes newest first, optionally filtered by a case-insensitive
    /// substring of the title.
    pub async fn list(
        pool: &PgPool,
        title_query: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Recipe>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recipes \
             WHERE ($1::TEXT IS NULL OR title ILIKE $1 ESCAPE '\\') \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Recipe>(&query)
            .bind(title_query.map(contains_pattern))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count recipes matching the same filter as [`RecipeRepo::list`].
    pub async fn count(pool: &PgPool, title_query: Option<&str>) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM recipes \
             WHERE ($1::TEXT IS NULL OR title ILIKE $1 ESCAPE '\\')",
        )
        .bind(title_query.map(contains_pattern))
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}

type RecipeQuery<'q> =
    sqlx::query::QueryAs<'q, sqlx::Postgres, Recipe, sqlx::postgres::PgArguments>;

/// Bind the `INSERT_COLUMNS` values in order.
///
/// The description is stored trimmed regardless of entry point.
fn bind_create<'q>(query: RecipeQuery<'q>, input: &'q CreateRecipe) -> RecipeQuery<'q> {
    query
        .bind(input.source_url.as_deref())
        .bind(input.resolved_type().as_str())
        .bind(&input.title)
        .bind(&input.author)
        .bind(input.description.trim())
        .bind(input.total_time)
        .bind(&input.yields)
        .bind(&input.image)
        .bind(&input.ingredients)
        .bind(&input.instructions)
        .bind(input.views)
}

/// Build an `ILIKE` pattern matching `needle` anywhere, with `%`, `_` and
/// `\` in the user input matched literally.
fn contains_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_wraps_with_wildcards() {
        assert_eq!(contains_pattern("soup"), "%soup%");
    }

    #[test]
    fn pattern_escapes_like_metacharacters() {
        assert_eq!(contains_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }
}
