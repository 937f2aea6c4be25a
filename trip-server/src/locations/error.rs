//! Location API error types.

use crate::domain::LocationId;

/// Errors that can occur when resolving a location.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The identifier is unknown to the location service
    #[error("location {0} not found")]
    NotFound(LocationId),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}
