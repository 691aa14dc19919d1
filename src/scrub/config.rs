//! Engine configuration

use crate::domain::errors::LedactError;
use crate::domain::result::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the scrub engine.
///
/// Controls where the pattern library and the optional deep-backend lexicon
/// come from, and whether audit logging is on. Validated fail-fast before
/// the engine is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// External pattern library TOML; embedded defaults when absent
    #[serde(default)]
    pub pattern_library: Option<PathBuf>,

    /// External lexicon for the deep backend; embedded defaults when absent
    #[serde(default)]
    pub lexicon: Option<PathBuf>,

    /// Attempt to load the deep entity-recognition backend
    #[serde(default = "default_deep_backend_enabled")]
    pub deep_backend_enabled: bool,

    /// Audit logging configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

fn default_deep_backend_enabled() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pattern_library: None,
            lexicon: None,
            deep_backend_enabled: true,
            audit: AuditConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        for (label, path) in [
            ("pattern_library", &self.pattern_library),
            ("lexicon", &self.lexicon),
        ] {
            if let Some(path) = path {
                if !path.exists() {
                    return Err(LedactError::Configuration(format!(
                        "{label} file not found: {}",
                        path.display()
                    )));
                }
                if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                    return Err(LedactError::Configuration(format!(
                        "{label} must be a TOML file: {}",
                        path.display()
                    )));
                }
            }
        }

        self.audit.validate()
    }
}

/// Audit logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON lines for audit entries
    #[serde(default = "default_audit_json_format")]
    pub json_format: bool,
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/scrub.log")
}

fn default_audit_json_format() -> bool {
    true
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: default_audit_json_format(),
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration, creating the log directory if needed.
    pub fn validate(&self) -> Result<()> {
        if self.enabled {
            if let Some(parent) = self.log_path.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        LedactError::Configuration(format!(
                            "failed to create audit log directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(config.pattern_library.is_none());
        assert!(config.deep_backend_enabled);
        assert!(!config.audit.enabled);
        assert!(config.audit.json_format);
    }

    #[test]
    fn test_default_config_validates() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_missing_pattern_library_rejected() {
        let config = EngineConfig {
            pattern_library: Some(PathBuf::from("/nonexistent/patterns.toml")),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_toml_pattern_library_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patterns.yaml");
        std::fs::write(&path, "rules: []").unwrap();

        let config = EngineConfig {
            pattern_library: Some(path),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
