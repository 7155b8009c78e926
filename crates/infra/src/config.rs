//! Configuration loading and representation.
//!
//! Everything comes from the process environment. The only required knob in
//! production is the document-store connection string.

use std::time::Duration;

use thiserror::Error;

pub const ENV_MONGODB_URI: &str = "MONGODB_URI";
pub const ENV_MONGODB_DATABASE: &str = "MONGODB_DATABASE";
pub const ENV_RETRY_TASK_DELAY_MS: &str = "RETRY_TASK_DELAY_MS";

pub const DEFAULT_DATABASE: &str = "exceptions";
pub const DEFAULT_RETRY_TASK_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} is set but empty")]
    Empty { key: &'static str },

    #[error("{key} must be a non-negative integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

/// Document-store connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Connection string (location + credentials).
    pub uri: String,
    /// Database used when the connection string does not name one.
    pub database: String,
}

// Hand-written so credentials embedded in the URI never reach the logs.
impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("uri", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

/// Process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `None` runs against the in-memory store (dev mode).
    pub store: Option<StoreConfig>,
    /// Duration of the simulated retry work.
    pub retry_task_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: None,
            retry_task_delay: DEFAULT_RETRY_TASK_DELAY,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = match lookup(ENV_MONGODB_URI) {
            None => None,
            Some(uri) if uri.trim().is_empty() => {
                return Err(ConfigError::Empty { key: ENV_MONGODB_URI });
            }
            Some(uri) => Some(StoreConfig {
                uri,
                database: lookup(ENV_MONGODB_DATABASE)
                    .filter(|db| !db.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            }),
        };

        let retry_task_delay = match lookup(ENV_RETRY_TASK_DELAY_MS) {
            None => DEFAULT_RETRY_TASK_DELAY,
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidNumber {
                    key: ENV_RETRY_TASK_DELAY_MS,
                    value: raw,
                })?,
        };

        Ok(Self {
            store,
            retry_task_delay,
        })
    }
}
