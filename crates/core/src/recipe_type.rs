//! Recipe provenance classification.
//!
//! These must match the CHECK constraint on `recipes.recipe_type` in
//! `20260301000001_create_recipes_table.sql`.

use serde::{Deserialize, Serialize};

pub const TYPE_URL: &str = "url";
pub const TYPE_IMAGE_UPLOAD: &str = "image_upload";
pub const TYPE_USER_INPUT: &str = "user_input";
pub const TYPE_AI_GENERATED: &str = "ai_generated";

/// How a recipe entered the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeType {
    Url,
    ImageUpload,
    UserInput,
    AiGenerated,
}

impl RecipeType {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Url => TYPE_URL,
            Self::ImageUpload => TYPE_IMAGE_UPLOAD,
            Self::UserInput => TYPE_USER_INPUT,
            Self::AiGenerated => TYPE_AI_GENERATED,
        }
    }

    /// Default classification from provenance: a recipe with a source URL is
    /// a `url` recipe, anything else is `user_input`.
    pub fn for_source(source_url: Option<&str>) -> Self {
        match source_url {
            Some(_) => Self::Url,
            None => Self::UserInput,
        }
    }

    /// Resolve the stored type, honouring an explicit override.
    pub fn resolve(explicit: Option<Self>, source_url: Option<&str>) -> Self {
        explicit.unwrap_or_else(|| Self::for_source(source_url))
    }
}
