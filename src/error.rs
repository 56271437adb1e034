//! Error types for OpenBot

use thiserror::Error;

/// Result type alias using OpenBot's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for OpenBot
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Neither the CLI nor a chat application is enabled
    #[error("No run mode enabled: enable the CLI or configure a usable chat_application")]
    NoRunMode,

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Logger setup error
    #[error("Logging error: {0}")]
    Logging(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Check if error must stop startup
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::NoRunMode)
    }
}
