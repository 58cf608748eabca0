//! Startup configuration from environment variables.
//!
//! # Responsibility
//! - Resolve bind address, session lifetime and logging settings once at
//!   startup.
//!
//! # Invariants
//! - Unset or blank variables fall back to defaults.
//! - The resolved log directory is always absolute.

use crate::session::DEFAULT_IDLE_TIMEOUT;
use kondate_core::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const BIND_ENV: &str = "KONDATE_BIND";
pub const LOG_LEVEL_ENV: &str = "KONDATE_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "KONDATE_LOG_DIR";
pub const SESSION_IDLE_ENV: &str = "KONDATE_SESSION_IDLE_MINUTES";

const DEFAULT_BIND: &str = "127.0.0.1:8501";
const DEFAULT_LOG_DIR_NAME: &str = "kondate-logs";

/// Configuration error raised before the server starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Bind value is not a `host:port` socket address.
    InvalidBind(String),
    /// Log directory must be absolute.
    RelativeLogDir(String),
    /// Idle minutes must be a positive integer.
    InvalidIdleMinutes(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBind(value) => {
                write!(f, "{BIND_ENV} must be a socket address like `{DEFAULT_BIND}`, got `{value}`")
            }
            Self::RelativeLogDir(value) => {
                write!(f, "{LOG_DIR_ENV} must be an absolute path, got `{value}`")
            }
            Self::InvalidIdleMinutes(value) => {
                write!(f, "{SESSION_IDLE_ENV} must be a positive number of minutes, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    pub bind: SocketAddr,
    pub log_level: String,
    pub log_dir: PathBuf,
    pub session_idle: Duration,
}

impl WebConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, one call per variable name.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_raw = read(BIND_ENV).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBind(bind_raw.clone()))?;

        let log_level = read(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string());

        let log_dir = match read(LOG_DIR_ENV) {
            Some(raw) => {
                let path = PathBuf::from(&raw);
                if !path.is_absolute() {
                    return Err(ConfigError::RelativeLogDir(raw));
                }
                path
            }
            None => std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
        };

        let session_idle = match read(SESSION_IDLE_ENV) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(minutes) if minutes > 0 => Duration::from_secs(minutes.saturating_mul(60)),
                _ => return Err(ConfigError::InvalidIdleMinutes(raw)),
            },
            None => DEFAULT_IDLE_TIMEOUT,
        };

        Ok(Self {
            bind,
            log_level,
            log_dir,
            session_idle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, WebConfig, BIND_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV, SESSION_IDLE_ENV};
    use crate::session::DEFAULT_IDLE_TIMEOUT;
    use std::collections::HashMap;
    use std::time::Duration;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_unset_or_blank() {
        let config = WebConfig::from_lookup(lookup(&[(BIND_ENV, "  ")])).unwrap();
        assert_eq!(config.bind.to_string(), "127.0.0.1:8501");
        assert!(config.log_dir.is_absolute());
        assert!(config.log_dir.ends_with("kondate-logs"));
        assert!(!config.log_level.is_empty());
        assert_eq!(config.session_idle, DEFAULT_IDLE_TIMEOUT);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = WebConfig::from_lookup(lookup(&[
            (BIND_ENV, "0.0.0.0:9000"),
            (LOG_LEVEL_ENV, "warn"),
            (LOG_DIR_ENV, "/var/log/kondate"),
            (SESSION_IDLE_ENV, "30"),
        ]))
        .unwrap();
        assert_eq!(config.session_idle, Duration::from_secs(30 * 60));
        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.to_str(), Some("/var/log/kondate"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(
            WebConfig::from_lookup(lookup(&[(BIND_ENV, "localhost")])),
            Err(ConfigError::InvalidBind("localhost".to_string()))
        );
        assert!(matches!(
            WebConfig::from_lookup(lookup(&[(LOG_DIR_ENV, "logs")])),
            Err(ConfigError::RelativeLogDir(_))
        ));
        for raw in ["0", "-5", "soon"] {
            assert_eq!(
                WebConfig::from_lookup(lookup(&[(SESSION_IDLE_ENV, raw)])),
                Err(ConfigError::InvalidIdleMinutes(raw.to_string()))
            );
        }
    }
}
