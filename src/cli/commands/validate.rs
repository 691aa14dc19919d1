//! Validate config command implementation

use super::{load_config_or_default, load_policy};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Policy file to validate alongside the configuration
    #[arg(short, long)]
    pub policy: Option<PathBuf>,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path, "validating configuration");

        let config = match load_config_or_default(config_path) {
            Ok(config) => {
                println!("Configuration OK: {config_path}");
                config
            }
            Err(e) => {
                eprintln!("Configuration invalid: {e:#}");
                return Ok(2);
            }
        };

        println!("  Application:  {}", config.application.name);
        println!("  Log level:    {}", config.application.log_level);
        println!(
            "  Patterns:     {}",
            config
                .engine
                .pattern_library
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(embedded)".to_string())
        );
        println!("  Deep backend: {}", config.engine.deep_backend_enabled);
        println!("  Audit:        {}", config.engine.audit.enabled);

        if let Some(policy_path) = &self.policy {
            match load_policy(policy_path) {
                Ok(_) => println!("Policy OK: {}", policy_path.display()),
                Err(e) => {
                    eprintln!("Policy invalid: {e:#}");
                    return Ok(2);
                }
            }
        }

        Ok(0)
    }
}
