use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use scrapeme_core::error::CoreError;
use scrapeme_pipeline::PipelineError;
use serde_json::json;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`PipelineError`] for domain errors and adds
/// HTTP-specific variants. Every variant renders as `{"error": message}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `scrapeme_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A recipe service failure.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Core(core) => classify_core_error(core),

            AppError::Pipeline(pipeline) => match pipeline {
                PipelineError::Core(core) => classify_core_error(core),
                PipelineError::ScrapeFailed(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                PipelineError::Conversion(err) => {
                    tracing::warn!(error = %err, "Recipe conversion failed");
                    (StatusCode::BAD_GATEWAY, err.to_string())
                }
                PipelineError::Database(err) => classify_sqlx_error(err),
            },

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

fn classify_core_error(err: &CoreError) -> (StatusCode, String) {
    match err {
        CoreError::MissingParameter(msg)
        | CoreError::InvalidParameter(msg)
        | CoreError::InvalidUrl(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
        }
    }
}

/// Classify a sqlx error into an HTTP status and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String) {
    match err {
        sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
        }
    }
}
