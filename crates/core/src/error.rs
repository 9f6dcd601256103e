#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A required request parameter was absent or empty.
    #[error("{0}")]
    MissingParameter(String),

    /// A request parameter was present but malformed or out of range.
    #[error("{0}")]
    InvalidParameter(String),

    /// A recipe URL failed scheme/host validation.
    #[error("{0}")]
    InvalidUrl(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
