//! Error types for godag

use thiserror::Error;

/// Result type for godag operations
pub type Result<T> = std::result::Result<T, GoError>;

/// Failures of a conversion run. Every variant is fatal to the run.
#[derive(Debug, Error)]
pub enum GoError {
    #[error("Download error: {0}")]
    Download(#[from] reqwest::Error),

    #[error("HTTP error {status} while fetching {url}")]
    Http {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl GoError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
