use scrapeme_core::error::CoreError;

use crate::convert::ConversionError;

/// Error type shared by the recipe services.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Request validation failed before any external call.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The scraper could not produce a payload. The message is the
    /// scraper's own and is safe to show to the caller.
    #[error("{0}")]
    ScrapeFailed(String),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
