use std::path::PathBuf;

/// Page scraped by `GET /api/v1/recipes/sample` when `SAMPLE_RECIPE_URL` is unset.
pub const DEFAULT_SAMPLE_RECIPE_URL: &str =
    "https://www.allrecipes.com/recipe/21587/chinese-chicken-fried-rice-ii/";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// System prompt document for raw-text conversion. Unset disables conversion.
    pub system_prompt_path: Option<PathBuf>,
    /// Page used by the sample scrape endpoint.
    pub sample_recipe_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SYSTEM_PROMPT_PATH`   | unset                      |
    /// | `SAMPLE_RECIPE_URL`    | an allrecipes page         |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let system_prompt_path = std::env::var("SYSTEM_PROMPT_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let sample_recipe_url = std::env::var("SAMPLE_RECIPE_URL")
            .unwrap_or_else(|_| DEFAULT_SAMPLE_RECIPE_URL.into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            system_prompt_path,
            sample_recipe_url,
        }
    }
}
