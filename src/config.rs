//! Configuration management
//!
//! Configuration is a small TOML file: the list of raw search lines and the
//! scan interval. Missing sections fall back to defaults, so an empty file
//! is a valid configuration that probes the built-in default target once a
//! minute.
//!
//! ```toml
//! [scheduler]
//! interval_seconds = 60
//!
//! [search]
//! configs = [".*replication.*type=agent.*id=\"publish\".*|QueueNumEntries"]
//! ```

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scan scheduling settings
    pub scheduler: SchedulerConfig,
    /// Search rule settings
    pub search: SearchConfig,
}

/// Scan scheduling settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Seconds between scans; the legacy schedule is once per minute
    pub interval_seconds: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 60,
        }
    }
}

/// Search rule settings
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Raw search lines in `namePattern|attributePattern` form
    ///
    /// An empty list means the built-in default search line is used.
    pub configs: Vec<String>,
}

impl Config {
    /// Load and validate configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError` if the file cannot be read,
    /// `ConfigError::TomlError` if it is not valid TOML, and
    /// `ConfigError::ValidationError` if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` for a zero scan interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scheduler.interval_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "scheduler.interval_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// The scan interval as a `Duration`
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.scheduler.interval_seconds)
    }
}
