//! Pulsebot - minimal Telegram bot with a `/start` greeting and an owner heartbeat

pub mod channels;
pub mod commands;
pub mod config;
pub mod error;
pub mod heartbeat;

pub use config::Config;
pub use error::{BotError, Result};
