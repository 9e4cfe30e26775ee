//! Quote configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. Command-line flags in the binaries override these.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::pool::DbConfig;

/// Default database file for local runs.
pub const DEFAULT_DB_PATH: &str = "./gemcraft_dev.db";

/// Configuration shared by the `seed` and `quote` binaries.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteConfig {
    /// SQLite price sheet location
    pub database_path: PathBuf,

    /// Tax percentage to quote with; `None` uses the engine default
    pub tax_percent: Option<f64>,

    /// Pool size
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection
    pub connect_timeout_secs: u64,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        QuoteConfig {
            database_path: PathBuf::from(DEFAULT_DB_PATH),
            tax_percent: None,
            max_connections: 5,
            connect_timeout_secs: 30,
        }
    }
}

impl QuoteConfig {
    /// Load configuration from environment variables.
    ///
    /// - `GEMCRAFT_DB_PATH`
    /// - `GEMCRAFT_TAX_PERCENT`
    /// - `GEMCRAFT_DB_MAX_CONNECTIONS`
    /// - `GEMCRAFT_DB_CONNECT_TIMEOUT_SECS`
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = QuoteConfig::default();

        let tax_percent = match get("GEMCRAFT_TAX_PERCENT") {
            Some(raw) => Some(parse_tax_percent(&raw).ok_or_else(|| {
                ConfigError::InvalidValue("GEMCRAFT_TAX_PERCENT".to_string())
            })?),
            None => None,
        };

        Ok(QuoteConfig {
            database_path: get("GEMCRAFT_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),

            tax_percent,

            max_connections: get("GEMCRAFT_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| defaults.max_connections.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("GEMCRAFT_DB_MAX_CONNECTIONS".to_string()))?,

            connect_timeout_secs: get("GEMCRAFT_DB_CONNECT_TIMEOUT_SECS")
                .unwrap_or_else(|| defaults.connect_timeout_secs.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("GEMCRAFT_DB_CONNECT_TIMEOUT_SECS".to_string()))?,
        })
    }

    /// Pool settings for this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
            .max_connections(self.max_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
    }
}

/// Parses a tax percentage, rejecting anything that is not a finite number.
pub fn parse_tax_percent(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
