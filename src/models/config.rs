//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::DateOrder;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Where the access token is persisted
    #[serde(default)]
    pub session: SessionConfig,

    /// Public board behavior
    #[serde(default)]
    pub board: BoardConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        let base = Url::parse(&self.api.base_url)
            .map_err(|e| AppError::validation(format!("api.base_url is invalid: {e}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(AppError::validation("api.base_url must be http or https"));
        }
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.session.path.as_os_str().is_empty() {
            return Err(AppError::validation("session.path is empty"));
        }
        Ok(())
    }
}

/// Backend HTTP settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined onto
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            timeout_secs: defaults::timeout(),
            user_agent: defaults::user_agent(),
        }
    }
}

/// Session persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// JSON file holding `{"accessToken": "..."}`
    #[serde(default = "defaults::session_path")]
    pub path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: defaults::session_path(),
        }
    }
}

/// Public board settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Date order used for the initial load
    #[serde(default)]
    pub default_date_order: DateOrder,

    /// Quiet period before a search edit is dispatched (0 disables)
    #[serde(default = "defaults::search_debounce")]
    pub search_debounce_ms: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_date_order: DateOrder::default(),
            search_debounce_ms: defaults::search_debounce(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    pub fn base_url() -> String {
        "http://localhost:8081".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn user_agent() -> String {
        concat!("inquiry-board/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn session_path() -> PathBuf {
        PathBuf::from(".inquiry-board/session.json")
    }
    pub fn search_debounce() -> u64 {
        300
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_falls_back_per_field() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "https://board.example.edu"

            [board]
            default_date_order = "OLDEST"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://board.example.edu");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.board.default_date_order, DateOrder::Oldest);
        assert_eq!(config.board.search_debounce_ms, 300);
    }

    #[test]
    fn load_or_default_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("missing.toml"));
        assert_eq!(config.api.base_url, "http://localhost:8081");
    }
}
