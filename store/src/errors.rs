use thiserror::Error;

/// Result type alias for store operations
pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Errors surfaced by the ranking store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Connecting or the liveness probe failed. Fatal for the request,
    /// never retried.
    #[error("Connection failed: {0}")]
    Unavailable(String),

    /// A command failed after a healthy connection was established.
    #[error("{0}")]
    Operation(String),
}

impl StoreError {
    pub fn unavailable(err: impl std::fmt::Display) -> Self {
        StoreError::Unavailable(err.to_string())
    }

    pub fn operation(err: impl std::fmt::Display) -> Self {
        StoreError::Operation(err.to_string())
    }
}
