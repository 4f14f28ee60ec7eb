//! Error types for talentlens.

use thiserror::Error;

/// talentlens error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Query was empty after trimming. Callers drop this silently.
    #[error("Empty query")]
    EmptyQuery,

    /// Transport failure, non-2xx status, or an undecodable response body.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Result type alias for talentlens operations.
pub type Result<T> = std::result::Result<T, Error>;
