//! CLI command implementations

pub mod analyze;
pub mod entities;
pub mod init;
pub mod scrub;
pub mod validate;

use crate::config::{load_config, LedactConfig};
use crate::scrub::policy::Policy;
use anyhow::Context;
use std::io::Read;
use std::path::Path;

/// Load configuration, falling back to defaults when the default config
/// file is absent.
pub(crate) fn load_config_or_default(path: &str) -> anyhow::Result<LedactConfig> {
    if Path::new(path).exists() {
        Ok(load_config(path)?)
    } else {
        tracing::debug!(path, "no configuration file, using defaults");
        Ok(LedactConfig::default())
    }
}

/// Load a policy TOML file.
pub(crate) fn load_policy(path: &Path) -> anyhow::Result<Policy> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read policy file {}", path.display()))?;
    Policy::from_toml_str(&content)
        .with_context(|| format!("invalid policy file {}", path.display()))
}

/// Read the input document: a file path, or stdin when absent or `-`.
pub(crate) fn read_input(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}
