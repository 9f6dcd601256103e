use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scrapeme_api::config::ServerConfig;
use scrapeme_api::router::build_app_router;
use scrapeme_api::state::AppState;
use scrapeme_llm::SystemPrompt;
use scrapeme_pipeline::RecipeConverter;
use scrapeme_scraper::{HttpRecipeScraper, ScraperConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "scrapeme_api=debug,scrapeme_pipeline=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = scrapeme_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    scrapeme_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    scrapeme_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Scraper ---
    let scraper = HttpRecipeScraper::new(&ScraperConfig::from_env())
        .expect("Failed to create recipe scraper");

    // --- Inference ---
    let provider = scrapeme_llm::create_provider_from_env()
        .expect("Failed to create inference provider");

    let system_prompt = match &config.system_prompt_path {
        Some(path) => match SystemPrompt::load(path) {
            Ok(prompt) => Some(prompt),
            Err(e) => {
                tracing::warn!(error = %e, "Recipe conversion disabled");
                None
            }
        },
        None => {
            tracing::warn!("SYSTEM_PROMPT_PATH is not set; recipe conversion disabled");
            None
        }
    };

    let converter = RecipeConverter::new(Arc::from(provider), system_prompt);
    tracing::info!(
        provider = converter.provider().provider_name(),
        model = converter.provider().model_name(),
        "Inference provider ready",
    );

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        scraper: Arc::new(scraper),
        converter: Arc::new(converter),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
