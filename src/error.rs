//! Error types for Quick Translate Bot

use thiserror::Error;

/// Result type alias for bot operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while serving webhook updates
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Telegram Bot API call failed
    #[error("channel error: {0}")]
    Channel(String),

    /// Translation endpoint failed or returned an unexpected payload
    #[error("translation error: {0}")]
    Translation(String),

    /// HTTP server error
    #[error("server error: {0}")]
    Server(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
