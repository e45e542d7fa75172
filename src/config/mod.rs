//! Config Module - Startup configuration
//!
//! Settings come from a TOML or JSON file (chosen by extension), with the
//! `PORT` environment variable and command-line flags layered on top. The
//! dataset path defaults to the fixed relative file name the service has
//! always read.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATA_PATH: &str = "dummy_patient_data.json";

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(String),
    #[error("Invalid TOML: {0}")]
    Toml(String),
    #[error("Invalid JSON: {0}")]
    Json(String),
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Main configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load from file. The format is chosen by extension: `.toml` or `.json`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|e| ConfigError::Toml(e.to_string())),
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| ConfigError::Json(e.to_string()))
            }
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Defaults with the `PORT` environment variable applied. Unparseable
    /// values fall back to the default port rather than failing startup.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(port) = std::env::var("PORT").ok().and_then(|raw| parse_port(&raw)) {
            config.server.port = port;
        }
        config
    }

    /// Validate config
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push("Invalid server port".to_string());
        }

        if self.server.host.parse::<std::net::IpAddr>().is_err() {
            errors.push(format!("Invalid server host: {}", self.server.host));
        }

        if self.data.path.as_os_str().is_empty() {
            errors.push("Data path must not be empty".to_string());
        }

        if self.logging.level.parse::<tracing::Level>().is_err() {
            errors.push(format!("Invalid logging level: {}", self.logging.level));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn parse_port(raw: &str) -> Option<u16> {
    raw.trim().parse().ok()
}
