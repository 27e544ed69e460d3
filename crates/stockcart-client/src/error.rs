//! # Client Error Types
//!
//! Errors from talking to the inventory API.

use thiserror::Error;

/// Result type alias for inventory API calls.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur when interacting with the inventory API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Base URL is not usable.
    #[error("Invalid inventory API URL: {0}")]
    InvalidUrl(String),

    /// HTTP request failed (connect, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request did not finish in time.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Resource does not exist.
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}
