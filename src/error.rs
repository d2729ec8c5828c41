//! Error types for Pulsebot
//!
//! This module defines the error type shared by the library. Uses
//! `thiserror` for the `Display` and `Error` implementations; the binary
//! wraps these in `anyhow` at the top level.

use thiserror::Error;

/// The primary error type for Pulsebot operations.
#[derive(Error, Debug)]
pub enum BotError {
    /// Configuration errors (missing token, malformed owner id, zero intervals)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Channel errors (message could not be delivered)
    #[error("Channel error: {0}")]
    Channel(String),

    /// Telegram Bot API request errors
    #[error("Telegram request error: {0}")]
    Request(#[from] teloxide::RequestError),
}

/// A specialized `Result` type for Pulsebot operations.
pub type Result<T> = std::result::Result<T, BotError>;
