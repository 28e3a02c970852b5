//! Configuration management for Postdeck.
//!
//! Loads configuration from ${POSTDECK_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default server origin when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default analytics window in days (matches the server's own default).
pub const DEFAULT_ANALYTICS_DAYS: u32 = 30;

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;

/// Application configuration.
///
/// Missing keys fall back to defaults, so a partial (or absent) config
/// file is always valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Origin of the scheduling service, e.g. `https://sched.example.com`.
    pub base_url: String,
    /// Lookback window passed to `/api/analytics/summary`.
    pub analytics_days: u32,
    /// Total timeout applied to every request.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            analytics_days: DEFAULT_ANALYTICS_DAYS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Loads the configuration from `${POSTDECK_HOME}/config.toml`.
    ///
    /// Returns defaults if the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads the configuration from an explicit path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Parses a TOML configuration string.
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or a value has the wrong type.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url)
            .with_context(|| format!("Invalid base_url: {}", self.base_url))?;
        Ok(())
    }
}

/// Filesystem locations used by Postdeck.
pub mod paths {
    use std::path::PathBuf;

    /// Environment variable overriding the Postdeck home directory.
    pub const HOME_ENV: &str = "POSTDECK_HOME";

    /// Returns the user's home directory, if one is known.
    pub fn home_dir() -> Option<PathBuf> {
        #[cfg(unix)]
        {
            std::env::var_os("HOME").map(PathBuf::from)
        }
        #[cfg(not(unix))]
        {
            std::env::var_os("USERPROFILE").map(PathBuf::from)
        }
    }

    /// Returns the Postdeck home directory (`$POSTDECK_HOME` or `~/.postdeck`).
    pub fn postdeck_home() -> PathBuf {
        if let Some(home) = std::env::var_os(HOME_ENV) {
            return PathBuf::from(home);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".postdeck")
    }

    /// Returns the path to the config file.
    pub fn config_path() -> PathBuf {
        postdeck_home().join("config.toml")
    }

    /// Returns the directory where log files are written.
    pub fn logs_dir() -> PathBuf {
        postdeck_home().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.analytics_days, 30);
        assert_eq!(config.request_timeout(), Duration::from_secs(20));
    }

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let config = Config::parse("base_url = \"http://sched.internal:9000\"").unwrap();
        assert_eq!(config.base_url, "http://sched.internal:9000");
        assert_eq!(config.analytics_days, DEFAULT_ANALYTICS_DAYS);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            "base_url = \"https://sched.example.com\"\n\
             analytics_days = 7\n\
             request_timeout_secs = 5\n",
        )
        .unwrap();
        assert_eq!(config.analytics_days, 7);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_parse_rejects_invalid_base_url() {
        let result = Config::parse("base_url = \"not a url\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_toml() {
        let result = Config::parse("base_url = ");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
