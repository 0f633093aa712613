//! Error types for the apiscope CLI.

use std::fmt;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug)]
pub enum CliError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// The source model could not be loaded
    Model(String),

    /// Configuration or settings error
    Config(String),

    /// Fetching a remote model failed
    Http(String),

    /// Invalid argument
    InvalidArgument(String),

    /// Output could not be written
    Output(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::Model(msg) => write!(f, "Model error: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Http(msg) => write!(f, "HTTP error: {}", msg),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::Output(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<apiscope_core::Error> for CliError {
    fn from(e: apiscope_core::Error) -> Self {
        match e {
            apiscope_core::Error::Io(io) => CliError::Io(io),
            other => CliError::Model(other.to_string()),
        }
    }
}

impl From<apiscope_config::ConfigError> for CliError {
    fn from(e: apiscope_config::ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<apiscope_http_client::HttpClientError> for CliError {
    fn from(e: apiscope_http_client::HttpClientError) -> Self {
        CliError::Http(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e.to_string())
    }
}
