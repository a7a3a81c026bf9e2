//! Client configuration.
//!
//! Stored as JSON in `<config dir>/wins/config.json`. Every field is
//! optional; a missing file means all defaults. `WINS_API_URL` overrides the
//! API base URL.

use crate::client::{DEFAULT_BASE_URL, REQUEST_TIMEOUT_SECS};
use crate::error::{Result, WinsError};
use crate::types::AddWinSchema;
use serde::{Deserialize, Serialize};
use spiral::{MAX_PATH_SEGMENTS, SceneOptions};
use std::path::{Path, PathBuf};

/// Environment variable overriding [`ClientConfig::api_base_url`].
pub const API_URL_ENV: &str = "WINS_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Backend base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Text field name(s) used when adding a win
    #[serde(default)]
    pub add_win_schema: AddWinSchema,

    /// Per-request timeout
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Spiral geometry and label placement
    #[serde(default)]
    pub scene: SceneOptions,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            add_win_schema: AddWinSchema::default(),
            request_timeout_secs: default_request_timeout(),
            scene: SceneOptions::default(),
        }
    }
}

impl ClientConfig {
    /// Replace the base URL when `value` is set and non-blank.
    pub fn with_api_url_override(mut self, value: Option<String>) -> Self {
        if let Some(url) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            self.api_base_url = url;
        }
        self
    }

    /// Apply `WINS_API_URL`.
    pub fn with_env_overrides(self) -> Self {
        self.with_api_url_override(std::env::var(API_URL_ENV).ok())
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.api_base_url.trim();
        if url.is_empty() {
            return Err(WinsError::Config("apiBaseUrl must not be empty".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(WinsError::Config(format!(
                "apiBaseUrl must start with http:// or https://, got {url}"
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(WinsError::Config(
                "requestTimeoutSecs must be positive".to_string(),
            ));
        }
        let segments = self.scene.path_segments;
        if !(1..=MAX_PATH_SEGMENTS).contains(&segments) {
            return Err(WinsError::Config(format!(
                "scene.pathSegments must be between 1 and {MAX_PATH_SEGMENTS}, got {segments}"
            )));
        }
        Ok(())
    }
}

/// `<config dir>/wins/config.json`
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| WinsError::Config("no config directory".to_string()))?;
    Ok(config_dir.join("wins").join("config.json"))
}

/// Load config from `path`; a missing file yields defaults.
pub fn load_config(path: &Path) -> Result<ClientConfig> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ClientConfig::default());
        }
        Err(err) => return Err(err.into()),
    };
    let config: ClientConfig = serde_json::from_str(&contents)?;
    Ok(config)
}

pub fn save_config(path: &Path, config: &ClientConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(config)?)?;
    Ok(())
}

fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

fn default_request_timeout() -> u64 {
    REQUEST_TIMEOUT_SECS
}
