//! Configuration management for agriweb
//!
//! Loads and validates the front-end configuration from a YAML file.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigResult};

/// Resource pages the front-end can serve
pub const PAGE_NAMES: [&str; 4] = ["farmers", "crops", "markets", "transactions"];

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

/// Upstream REST API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Root URL of the records API, without the `/api` suffix
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// UI behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Seconds before a status message dismisses itself
    #[serde(default = "default_message_dismiss_secs")]
    pub message_dismiss_secs: u64,
    /// Page the index redirects to
    #[serde(default = "default_page")]
    pub default_page: String,
    /// Seconds a browser page may stay idle before its state is dropped
    #[serde(default = "default_page_idle_secs")]
    pub page_idle_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            message_dismiss_secs: default_message_dismiss_secs(),
            default_page: default_page(),
            page_idle_secs: default_page_idle_secs(),
        }
    }
}

fn default_message_dismiss_secs() -> u64 {
    5
}

fn default_page() -> String {
    "farmers".to_string()
}

fn default_page_idle_secs() -> u64 {
    1800
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError,
        })?;

        let config = Self::from_yaml(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: PathBuf) -> ConfigResult<Self> {
        match Self::load(&path) {
            Err(ConfigError::FileNotFound { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    /// Parse configuration from YAML text without validating it
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        let base_url = self.api.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                reason: "Base URL must start with http:// or https://".to_string(),
            });
        }

        if !(1..=300).contains(&self.api.timeout_secs) {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".to_string(),
                reason: "Request timeout must be between 1 and 300 seconds".to_string(),
            });
        }

        if !(1..=60).contains(&self.ui.message_dismiss_secs) {
            return Err(ConfigError::InvalidValue {
                field: "ui.message_dismiss_secs".to_string(),
                reason: "Message dismiss interval must be between 1 and 60 seconds".to_string(),
            });
        }

        if self.ui.page_idle_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ui.page_idle_secs".to_string(),
                reason: "Page idle timeout must be greater than 0".to_string(),
            });
        }

        if !PAGE_NAMES.contains(&self.ui.default_page.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "ui.default_page".to_string(),
                reason: format!("Default page must be one of: {}", PAGE_NAMES.join(", ")),
            });
        }

        Ok(())
    }

    /// The bundled default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Address the front-end server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
