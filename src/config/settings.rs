//! Configuration settings for the slated server.
//!
//! The configuration is constructed once at process start and passed by
//! reference into the scheduler and API layers; there is no ambient
//! global state.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub analyzer: AnalyzerConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations or use defaults.
    pub fn load() -> Result<Self> {
        let config_paths = [
            // Current directory
            PathBuf::from("slated.toml"),
            PathBuf::from("config.toml"),
            // User config directory
            dirs::config_dir()
                .map(|p| p.join("slated/config.toml"))
                .unwrap_or_default(),
            // Home directory
            dirs::home_dir()
                .map(|p| p.join(".slated/config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.analyzer.enabled {
            if self.analyzer.api_endpoint.is_empty() {
                return Err(ConfigError::MissingField("analyzer.api_endpoint".to_string()).into());
            }
            if self.analyzer.model.is_empty() {
                return Err(ConfigError::MissingField("analyzer.model".to_string()).into());
            }
        }
        if self.analyzer.max_attempts == 0 {
            return Err(ConfigError::Invalid("analyzer.max_attempts must be > 0".to_string()).into());
        }
        Ok(())
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// HTTP port.
    pub http_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            http_port: 8000,
        }
    }
}

/// External analyzer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Whether the external analyzer path is attempted at all.
    pub enabled: bool,
    /// Base URL of the OpenAI-compatible endpoint.
    pub api_endpoint: String,
    /// Model name.
    pub model: String,
    /// API key (falls back to the `SLATED_ANALYZER_API_KEY` environment
    /// variable when unset).
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Attempts per request before giving up and falling back.
    pub max_attempts: u32,
    /// Delay between attempts in milliseconds.
    pub retry_delay_ms: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_endpoint: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            timeout_secs: 30,
            max_attempts: 3,
            retry_delay_ms: 500,
        }
    }
}
