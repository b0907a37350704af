//! Configuration for the feedscan application.
//!
//! Loaded from TOML. Every section and field has a default, so a missing
//! file section or key simply keeps the built-in value.

use feedscan_search::SearchConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Feed list and search run settings.
    pub search: SearchSettings,
    /// Log output settings.
    pub logging: LoggingConfig,
}

/// Search run settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// JSON feed list to search.
    pub feeds_path: PathBuf,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Capacity of the result channel between workers and the display.
    pub channel_capacity: usize,
    /// Maximum feeds searched at once (None = all at once).
    pub max_concurrent_feeds: Option<usize>,
    /// Deadline for a whole run in seconds (None = no deadline).
    pub run_timeout_seconds: Option<u64>,
    /// User-Agent for feed requests (None = built-in).
    pub user_agent: Option<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        let search = SearchConfig::default();
        Self {
            feeds_path: PathBuf::from("data/data.json"),
            timeout_seconds: search.timeout_seconds,
            channel_capacity: search.channel_capacity,
            max_concurrent_feeds: search.max_concurrent_feeds,
            run_timeout_seconds: search.run_timeout_seconds,
            user_agent: search.user_agent,
        }
    }
}

impl SearchSettings {
    /// The library-level configuration for these settings.
    pub fn to_search_config(&self) -> SearchConfig {
        SearchConfig {
            timeout_seconds: self.timeout_seconds,
            channel_capacity: self.channel_capacity,
            max_concurrent_feeds: self.max_concurrent_feeds,
            run_timeout_seconds: self.run_timeout_seconds,
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directives, used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "feedscan=info,feedscan_search=info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or holds
    /// invalid search settings.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the search settings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        self.search
            .to_search_config()
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))
    }

    /// Returns the default config file path: `~/.config/feedscan/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("feedscan").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("feedscan")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/feedscan-config/config.toml")
        }
    }

    /// Load `path` if given, else the default path if it exists, else defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given or existing default file is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Self::default_config_path();
                if default_path.is_file() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
