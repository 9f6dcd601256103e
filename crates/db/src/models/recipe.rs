//! Recipe model and DTOs.

use scrapeme_core::recipe_type::RecipeType;
use scrapeme_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `recipes` table.
///
/// Field order is the serialized order returned by the API.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Recipe {
    pub id: DbId,
    pub source_url: Option<String>,
    pub description: String,
    pub title: String,
    pub author: String,
    pub total_time: Option<i32>,
    pub yields: String,
    pub image: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub views: i32,
    #[serde(rename = "type")]
    pub recipe_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a recipe.
///
/// `recipe_type` overrides the provenance default (`url` when
/// `source_url` is set, `user_input` otherwise).
#[derive(Debug, Clone, Default)]
pub struct CreateRecipe {
    pub source_url: Option<String>,
    pub recipe_type: Option<RecipeType>,
    pub title: String,
    pub author: String,
    pub description: String,
    pub total_time: Option<i32>,
    pub yields: String,
    pub image: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub views: i32,
}

impl CreateRecipe {
    /// The type this recipe will be stored with.
    pub fn resolved_type(&self) -> RecipeType {
        RecipeType::resolve(self.recipe_type, self.source_url.as_deref())
    }
}
