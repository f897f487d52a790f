/// Application configuration read once at startup
use crate::schedule::{ScheduleClientConfig, DEFAULT_BASE_URL};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Errors raised while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON, or `roomId` is missing or not a string
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// `roomId` is present but empty
    #[error("roomId must not be empty")]
    EmptyRoomId,
}

/// Contents of the JSON config file.
///
/// ```json
/// { "roomId": "1234" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub room_id: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds; the transport default applies when unset
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl AppConfig {
    /// Loads the configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parses the configuration from JSON text.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(content)?;
        if config.room_id.is_empty() {
            return Err(ConfigError::EmptyRoomId);
        }
        Ok(config)
    }

    /// Settings for the schedule client.
    pub fn client_config(&self) -> ScheduleClientConfig {
        ScheduleClientConfig {
            base_url: self.base_url.clone(),
            timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}
