//! Engine configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn default_api_url() -> String {
    std::env::var("RIG_API_URL").unwrap_or_else(|_| {
        tracing::debug!("RIG_API_URL not set, using development default");
        "http://127.0.0.1:3001".to_string()
    })
}

fn default_timeout_secs() -> u64 {
    30
}

/// Client engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Remote cart API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Durable cart snapshot location
    pub cart_db_path: PathBuf,
    /// Remote request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            cart_db_path: PathBuf::from("./data/cart.redb"),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a file, falling back to defaults when the
    /// file does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content).map_err(|e| ConfigError::Invalid(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
