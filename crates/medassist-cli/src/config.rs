//! Configuration file support

use medassist_api::Endpoints;
use medassist_api::client::{DEFAULT_DIALOGUE_PATH, DEFAULT_IMAGE_PATH};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Shortest reply deadline; anything lower fails every turn
pub const MIN_RESPONSE_TIMEOUT_SECS: u64 = 1;

/// Configuration for medassist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend base URL
    pub base_url: String,
    /// Path of the dialogue endpoint
    pub dialogue_path: String,
    /// Path prefix of the image search endpoint
    pub image_path: String,
    /// Seconds to wait for a reply before giving up on a turn
    pub response_timeout_secs: u64,
    /// Search related images when the assistant suggests a term
    pub show_images: bool,
    /// Print markup instead of plain text
    pub raw_markup: bool,
    /// Column at which assistant text wraps
    pub wrap_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            dialogue_path: DEFAULT_DIALOGUE_PATH.to_string(),
            image_path: DEFAULT_IMAGE_PATH.to_string(),
            response_timeout_secs: 20,
            show_images: true,
            raw_markup: false,
            wrap_width: 100,
        }
    }
}

impl Config {
    /// Get the config directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("medassist")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("MEDASSIST_CONFIG_PATH") {
            return PathBuf::from(path);
        }
        Self::config_dir().join("config.toml")
    }

    /// Load config from file, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse config file: {}", e);
                Self::default()
            }),
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save config to file
    pub fn save(&self) -> std::io::Result<()> {
        let path = Self::config_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, content)
    }

    /// Create a default config file if it doesn't exist
    pub fn init() -> std::io::Result<PathBuf> {
        let path = Self::config_path();
        if path.exists() {
            return Ok(path);
        }
        Self::default().save()?;
        Ok(path)
    }

    /// Reply deadline, never below [`MIN_RESPONSE_TIMEOUT_SECS`]
    pub fn response_timeout(&self) -> Duration {
        if self.response_timeout_secs < MIN_RESPONSE_TIMEOUT_SECS {
            tracing::warn!(
                configured = self.response_timeout_secs,
                "response_timeout_secs too low, using {MIN_RESPONSE_TIMEOUT_SECS}"
            );
        }
        Duration::from_secs(self.response_timeout_secs.max(MIN_RESPONSE_TIMEOUT_SECS))
    }

    /// Backend endpoints described by this config
    pub fn endpoints(&self) -> Endpoints {
        let mut endpoints = Endpoints::new(&self.base_url);
        endpoints.dialogue_path = self.dialogue_path.clone();
        endpoints.image_path = self.image_path.clone();
        endpoints
    }
}

/// Generate example config content
pub fn example_config() -> &'static str {
    r#"# medassist configuration file
# Place at ~/.config/medassist/config.toml (Linux), or point MEDASSIST_CONFIG_PATH at it

# Backend service
base_url = "http://127.0.0.1:5000"
dialogue_path = "/gemini-interactive"
image_path = "/gemini/image"

# Give up on a reply after this many seconds
response_timeout_secs = 20

# Search related images when the assistant suggests them
show_images = true

# Print markup as-is instead of plain text
raw_markup = false

# Wrap assistant text at this column
wrap_width = 100
"#
}
