//! Configuration schema types
//!
//! This module defines the root configuration structure for ledact.

use crate::scrub::config::EngineConfig;
use serde::{Deserialize, Serialize};

/// Main ledact configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedactConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Scrub engine settings
    #[serde(default)]
    pub engine: EngineConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for LedactConfig {
    fn default() -> Self {
        Self {
            application: ApplicationConfig::default(),
            engine: EngineConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl LedactConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error message if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.engine.validate().map_err(|e| e.to_string())?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name used in log output
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_app_name() -> String {
    "ledact".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("application.name must not be empty".to_string());
        }
        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(format!(
                "application.log_level must be one of trace, debug, info, warn, error; got {other}"
            )),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable file logging
    #[serde(default)]
    pub file_enabled: bool,

    /// Directory for rotated log files
    #[serde(default = "default_log_path")]
    pub file_path: String,

    /// Rotation interval: daily or hourly
    #[serde(default = "default_rotation")]
    pub file_rotation: String,
}

fn default_log_path() -> String {
    "./logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file_enabled: false,
            file_path: default_log_path(),
            file_rotation: default_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        match self.file_rotation.as_str() {
            "daily" | "hourly" => Ok(()),
            other => Err(format!(
                "logging.file_rotation must be daily or hourly; got {other}"
            )),
        }
    }
}
