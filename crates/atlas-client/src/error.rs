//! Catalog client error types.

use thiserror::Error;

/// Errors that can occur when writing to the Atlas catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Atlas returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by Atlas.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The entity or relationship being created already exists.
    #[error("already exists: {message}")]
    Duplicate {
        /// Atlas error message.
        message: String,
    },

    /// Atlas returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Failed to parse an Atlas response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The configured endpoint cannot be used.
    #[error("invalid catalog endpoint: {0}")]
    InvalidEndpoint(String),
}

impl CatalogError {
    /// Whether this failure means the object already exists in the catalog.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}
