use axum::routing::{get, post};
use axum::Router;

use crate::handlers::recipes;
use crate::state::AppState;

/// Recipe routes mounted at `/recipes`.
///
/// ```text
/// GET    /                  -> list
/// GET    /parse             -> parse
/// POST   /convert           -> convert
/// GET    /sample            -> sample
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(recipes::list))
        .route("/parse", get(recipes::parse))
        .route("/convert", post(recipes::convert))
        .route("/sample", get(recipes::sample))
}
