use thiserror::Error;

/// Router-level failures, mapped onto transport responses by the response
/// module. The `#[error]` strings are the exact `error` fields clients see.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// No dispatch-table entry matched the request.
    #[error("Endpoint not found")]
    NotFound,

    /// A write request without a usable player or score.
    #[error("Missing player or score")]
    MissingFields,

    /// Malformed write request (unparseable body, non-numeric score) or a
    /// store write that failed after a healthy connection.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A store read that failed after a healthy connection.
    #[error("{0}")]
    ReadFailed(String),
}

/// Failures of the HTTP front door itself.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}
