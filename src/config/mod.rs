//! Configuration module for Dishpick
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`DISHPICK_*`, plus a `.env` file)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use dishpick::config::DishpickConfig;
//!
//! let config = DishpickConfig::default();
//! assert_eq!(config.server.port, 5000);
//!
//! let toml = r#"
//! [llm]
//! model = "gpt-4o-mini"
//! "#;
//! let config: DishpickConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.llm.model, "gpt-4o-mini");
//! assert_eq!(config.llm.timeout_seconds, 30);
//! ```

pub mod catalog;
pub mod error;
pub mod llm;
pub mod logging;
pub mod server;

pub use catalog::CatalogConfig;
pub use error::ConfigError;
pub use llm::LlmConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Example configuration written by `dishpick config init`.
pub const EXAMPLE_CONFIG: &str = include_str!("../../dishpick.example.toml");

/// Unified configuration, built once at startup and passed into the service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DishpickConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// External completion service
    pub llm: LlmConfig,
    /// Dish table source
    pub catalog: CatalogConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl DishpickConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports DISHPICK_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("DISHPICK_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("DISHPICK_HOST") {
            self.server.host = host;
        }

        if let Ok(level) = std::env::var("DISHPICK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("DISHPICK_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(enabled) = std::env::var("DISHPICK_LLM_ENABLED") {
            match enabled.to_lowercase().as_str() {
                "true" | "1" => self.llm.enabled = true,
                "false" | "0" => self.llm.enabled = false,
                _ => {}
            }
        }
        if let Ok(model) = std::env::var("DISHPICK_LLM_MODEL") {
            self.llm.model = model;
        }
        if let Ok(url) = std::env::var("DISHPICK_LLM_BASE_URL") {
            self.llm.base_url = url;
        }

        if let Ok(path) = std::env::var("DISHPICK_CATALOG") {
            if !path.is_empty() {
                self.catalog.path = Some(path.into());
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation {
                field: "server.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }

        if self.llm.enabled {
            if self.llm.base_url.is_empty() {
                return Err(ConfigError::Validation {
                    field: "llm.base_url".to_string(),
                    message: "URL cannot be empty".to_string(),
                });
            }
            if self.llm.model.is_empty() {
                return Err(ConfigError::Validation {
                    field: "llm.model".to_string(),
                    message: "model cannot be empty".to_string(),
                });
            }
        }

        if self.llm.timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "llm.timeout_seconds".to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::Validation {
                field: "llm.temperature".to_string(),
                message: format!("must be between 0 and 2, got {}", self.llm.temperature),
            });
        }

        Ok(())
    }
}
