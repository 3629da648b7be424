//! Client error types.
//!
//! Every failure mode has a named variant. No stringly-typed errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response; `detail` carries the API's own message when the
    /// body was a well-formed error payload.
    #[error("API error ({status}): {detail}")]
    Api { status: u16, detail: String },
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
