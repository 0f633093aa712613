// Error types for request inference

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The method path could not be produced. Upstream always supplies at
    /// least an empty string, so this signals a broken caller contract.
    #[error("Missing path for handler method: {method}")]
    MissingPath { method: String },

    #[error("Source model error: {0}")]
    Model(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
