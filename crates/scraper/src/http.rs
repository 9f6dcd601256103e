//! HTTP scraper: fetch the page, extract its JSON-LD recipe.

use async_trait::async_trait;

use crate::jsonld::payload_from_html;
use crate::{RecipeScraper, ScrapeError, ScrapedPayload};

/// Default `User-Agent` sent with scrape requests.
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Scraper configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// `User-Agent` header for outbound requests (`SCRAPER_USER_AGENT`).
    pub user_agent: String,
}

impl ScraperConfig {
    pub fn from_env() -> Self {
        let user_agent =
            std::env::var("SCRAPER_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.into());
        Self { user_agent }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Scrapes recipes from live web pages.
#[derive(Debug, Clone)]
pub struct HttpRecipeScraper {
    client: reqwest::Client,
}

impl HttpRecipeScraper {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ScrapeError::Other(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RecipeScraper for HttpRecipeScraper {
    async fn scrape(&self, url: &str) -> Result<ScrapedPayload, ScrapeError> {
        let fetch_error = |e: reqwest::Error| ScrapeError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(fetch_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await.map_err(fetch_error)?;
        tracing::debug!(url, bytes = html.len(), "Fetched recipe page");

        payload_from_html(&html, url)
    }
}
