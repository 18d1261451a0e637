//! Portal configuration.
//!
//! Built once at startup and passed to the dashboard explicitly; nothing in
//! the domain crates reads the environment.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use dealerdesk_observability::LogFormat;

pub const SNAPSHOT_VAR: &str = "DEALERDESK_SNAPSHOT";
pub const REFRESH_VAR: &str = "DEALERDESK_REFRESH_SECS";
pub const LOG_FORMAT_VAR: &str = "DEALERDESK_LOG_FORMAT";

pub const DEFAULT_SNAPSHOT_PATH: &str = "snapshot.json";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of seconds, got {value:?}")]
    InvalidRefresh { var: &'static str, value: String },
    #[error("{var} must be one of json, pretty; got {value:?}")]
    InvalidLogFormat { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    pub snapshot_path: PathBuf,
    /// Zero means a single pass.
    pub refresh_interval: Duration,
    pub log_format: LogFormat,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            refresh_interval: Duration::ZERO,
            log_format: LogFormat::Json,
        }
    }
}

impl PortalConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(SNAPSHOT_VAR).filter(|p| !p.trim().is_empty()) {
            config.snapshot_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup(REFRESH_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidRefresh {
                var: REFRESH_VAR,
                value: raw.clone(),
            })?;
            config.refresh_interval = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            config.log_format = LogFormat::parse(&raw).ok_or_else(|| ConfigError::InvalidLogFormat {
                var: LOG_FORMAT_VAR,
                value: raw.clone(),
            })?;
        }

        Ok(config)
    }
}
