//! HTTP client error types.

use thiserror::Error;

/// Result type for HTTP client operations.
pub type Result<T> = std::result::Result<T, HttpClientError>;

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// Invalid client configuration.
    #[error("Invalid HTTP configuration: {0}")]
    Config(String),

    /// The underlying client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Build(String),

    /// Non-success response.
    #[error("Response error: {status} from {url}")]
    Response {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// Underlying HTTP client error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl HttpClientError {
    /// Check if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }

    /// Get the HTTP status code if this is a response error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
