//! Recipe scraping capability.
//!
//! A scraper turns a URL into a loosely-typed payload: a JSON object whose
//! field shapes vary by site. Callers normalize the payload themselves.

mod duration;
mod fake;
mod http;
mod jsonld;

pub use fake::FakeScraper;
pub use http::{HttpRecipeScraper, ScraperConfig};
pub use jsonld::payload_from_html;

use async_trait::async_trait;
use thiserror::Error;

/// A scraped recipe document: field name to arbitrary JSON value.
pub type ScrapedPayload = serde_json::Map<String, serde_json::Value>;

/// Error type for scrape operations.
///
/// Messages are shown to API clients verbatim.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("No recipe data found at {0}")]
    NoRecipe(String),

    #[error("{0}")]
    Other(String),
}

/// Trait for recipe scrapers.
///
/// Implementations must be thread-safe; one instance serves every request.
#[async_trait]
pub trait RecipeScraper: Send + Sync {
    /// Fetch `url` and extract its recipe payload.
    async fn scrape(&self, url: &str) -> Result<ScrapedPayload, ScrapeError>;
}
