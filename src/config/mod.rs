//! Process configuration for Pulsebot
//!
//! Everything is read once at startup from the environment. A `.env` file in
//! the working directory is loaded first when present; variables already set
//! in the real environment take precedence over it.

use std::time::Duration;

use teloxide::types::ChatId;
use tracing::debug;

use crate::error::{BotError, Result};

// ============================================================================
// Environment keys
// ============================================================================

/// Bot API credential. Same name `teloxide::Bot::from_env` uses.
pub const TOKEN_ENV: &str = "TELOXIDE_TOKEN";
/// Chat that receives heartbeat messages.
pub const OWNER_ID_ENV: &str = "OWNER_ID";
/// Seconds between successful heartbeats.
pub const HEARTBEAT_INTERVAL_ENV: &str = "HEARTBEAT_INTERVAL_SECS";
/// Seconds to wait before retrying a failed heartbeat.
pub const HEARTBEAT_RETRY_ENV: &str = "HEARTBEAT_RETRY_SECS";
/// `json` or `pretty`.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default long interval between heartbeats.
pub const DEFAULT_HEARTBEAT_INTERVAL_SECS: u64 = 60;
/// Default delay before a failed heartbeat is retried.
pub const DEFAULT_HEARTBEAT_RETRY_SECS: u64 = 30;

// ============================================================================
// LogFormat
// ============================================================================

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "" | "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(BotError::Config(format!(
                "{} must be 'pretty' or 'json', got '{}'",
                LOG_FORMAT_ENV, other
            ))),
        }
    }
}

// ============================================================================
// Config
// ============================================================================

/// Heartbeat timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartbeatConfig {
    /// Wait before each send that follows a successful one (and before the first).
    pub interval: Duration,
    /// Wait before re-sending after a failure.
    pub retry_delay: Duration,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_HEARTBEAT_INTERVAL_SECS),
            retry_delay: Duration::from_secs(DEFAULT_HEARTBEAT_RETRY_SECS),
        }
    }
}

/// Complete runtime configuration.
#[derive(Clone)]
pub struct Config {
    /// Bot API token.
    pub token: String,
    /// Destination chat for heartbeat messages.
    pub owner_id: ChatId,
    /// Heartbeat timing.
    pub heartbeat: HeartbeatConfig,
    /// Log output format.
    pub log_format: LogFormat,
}

// The token never shows up in logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("owner_id", &self.owner_id)
            .field("heartbeat", &self.heartbeat)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Config {
    /// Load `.env` (if any) and read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {:?}", path),
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(BotError::Config(format!("Failed to load .env file: {}", e)));
            }
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_ENV)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| BotError::Config(format!("{} is not set", TOKEN_ENV)))?;

        let owner_raw = lookup(OWNER_ID_ENV)
            .ok_or_else(|| BotError::Config(format!("{} is not set", OWNER_ID_ENV)))?;
        let owner_id = owner_raw.trim().parse::<i64>().map(ChatId).map_err(|_| {
            BotError::Config(format!(
                "{} must be an integer chat id, got '{}'",
                OWNER_ID_ENV,
                owner_raw.trim()
            ))
        })?;

        let heartbeat = HeartbeatConfig {
            interval: parse_secs(
                &lookup,
                HEARTBEAT_INTERVAL_ENV,
                DEFAULT_HEARTBEAT_INTERVAL_SECS,
            )?,
            retry_delay: parse_secs(&lookup, HEARTBEAT_RETRY_ENV, DEFAULT_HEARTBEAT_RETRY_SECS)?,
        };

        let log_format = match lookup(LOG_FORMAT_ENV) {
            Some(value) => LogFormat::parse(&value)?,
            None => LogFormat::default(),
        };

        Ok(Self {
            token,
            owner_id,
            heartbeat,
            log_format,
        })
    }
}

/// Read a positive number of seconds, falling back to `default` when unset.
fn parse_secs<F>(lookup: &F, key: &str, default: u64) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let secs = match lookup(key) {
        Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
            BotError::Config(format!(
                "{} must be a whole number of seconds, got '{}'",
                key,
                raw.trim()
            ))
        })?,
        None => default,
    };

    if secs == 0 {
        return Err(BotError::Config(format!("{} must be greater than zero", key)));
    }

    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config =
            Config::from_lookup(lookup_from(&[(TOKEN_ENV, "123:abc"), (OWNER_ID_ENV, "42")]))
                .unwrap();

        assert_eq!(config.token, "123:abc");
        assert_eq!(config.owner_id, ChatId(42));
        assert_eq!(config.heartbeat.interval, Duration::from_secs(60));
        assert_eq!(config.heartbeat.retry_delay, Duration::from_secs(30));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_missing_token() {
        let err = Config::from_lookup(lookup_from(&[(OWNER_ID_ENV, "42")])).unwrap_err();
        assert!(matches!(err, BotError::Config(_)));
        assert!(err.to_string().contains(TOKEN_ENV));
    }

    #[test]
    fn test_blank_token_is_missing() {
        let err = Config::from_lookup(lookup_from(&[(TOKEN_ENV, "   "), (OWNER_ID_ENV, "42")]))
            .unwrap_err();
        assert!(err.to_string().contains(TOKEN_ENV));
    }

    #[test]
    fn test_missing_owner() {
        let err = Config::from_lookup(lookup_from(&[(TOKEN_ENV, "123:abc")])).unwrap_err();
        assert!(err.to_string().contains(OWNER_ID_ENV));
    }

    #[test]
    fn test_malformed_owner() {
        let err = Config::from_lookup(lookup_from(&[
            (TOKEN_ENV, "123:abc"),
            (OWNER_ID_ENV, "@someone"),
        ]))
        .unwrap_err();
        assert!(matches!(err, BotError::Config(_)));
        assert!(err.to_string().contains("@someone"));
    }

    #[test]
    fn test_negative_group_owner_id() {
        let config = Config::from_lookup(lookup_from(&[
            (TOKEN_ENV, "123:abc"),
            (OWNER_ID_ENV, " -1001234567890 "),
        ]))
        .unwrap();
        assert_eq!(config.owner_id, ChatId(-1001234567890));
    }

    #[test]
    fn test_interval_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (TOKEN_ENV, "123:abc"),
            (OWNER_ID_ENV, "42"),
            (HEARTBEAT_INTERVAL_ENV, "300"),
            (HEARTBEAT_RETRY_ENV, "5"),
        ]))
        .unwrap();
        assert_eq!(config.heartbeat.interval, Duration::from_secs(300));
        assert_eq!(config.heartbeat.retry_delay, Duration::from_secs(5));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            (TOKEN_ENV, "123:abc"),
            (OWNER_ID_ENV, "42"),
            (HEARTBEAT_RETRY_ENV, "0"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(HEARTBEAT_RETRY_ENV));
    }

    #[test]
    fn test_non_numeric_interval_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            (TOKEN_ENV, "123:abc"),
            (OWNER_ID_ENV, "42"),
            (HEARTBEAT_INTERVAL_ENV, "1m"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(HEARTBEAT_INTERVAL_ENV));
    }

    #[test]
    fn test_log_format() {
        let config = Config::from_lookup(lookup_from(&[
            (TOKEN_ENV, "123:abc"),
            (OWNER_ID_ENV, "42"),
            (LOG_FORMAT_ENV, "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.log_format, LogFormat::Json);

        let err = Config::from_lookup(lookup_from(&[
            (TOKEN_ENV, "123:abc"),
            (OWNER_ID_ENV, "42"),
            (LOG_FORMAT_ENV, "xml"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(LOG_FORMAT_ENV));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config::from_lookup(lookup_from(&[
            (TOKEN_ENV, "123:super-secret"),
            (OWNER_ID_ENV, "42"),
        ]))
        .unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
