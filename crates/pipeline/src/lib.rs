//! Recipe services: scrape-and-persist, listing, and raw-text conversion.
//!
//! Each service takes its collaborators (pool, scraper, inference provider)
//! explicitly so the HTTP layer and tests can wire in fakes.

pub mod convert;
pub mod error;
pub mod listing;
pub mod resolve;

pub use convert::{ConversionError, ConvertRequest, RecipeConverter};
pub use error::PipelineError;
pub use listing::{list_recipes, RecipePage};
pub use resolve::{resolve_recipe, scrape_preview};
