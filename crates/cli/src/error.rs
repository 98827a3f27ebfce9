//! CLI error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),
    /// Input document could not be used
    #[error("Input error: {0}")]
    Input(String),
    /// Unknown bidder code
    #[error("Unknown bidder: {0}")]
    UnknownBidder(String),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
