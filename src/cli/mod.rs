//! CLI interface and argument parsing
//!
//! Command-line interface for ledact using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Ledact - legal text anonymization engine
#[derive(Parser, Debug)]
#[command(name = "ledact")]
#[command(version, about, long_about = None)]
#[command(author = "Ledact Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "ledact.toml", env = "LEDACT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LEDACT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scrub a document according to a policy
    Scrub(commands::scrub::ScrubArgs),

    /// Detect entities without substituting (inspection/audit)
    Analyze(commands::analyze::AnalyzeArgs),

    /// List supported entity types and engine availability
    Entities(commands::entities::EntitiesArgs),

    /// Validate configuration and policy files
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize sample configuration and policy files
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_scrub() {
        let cli = Cli::parse_from(["ledact", "scrub", "--policy", "policy.toml", "input.txt"]);
        assert_eq!(cli.config, "ledact.toml");
        assert!(matches!(cli.command, Commands::Scrub(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from([
            "ledact",
            "--config",
            "custom.toml",
            "scrub",
            "--policy",
            "policy.toml",
        ]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["ledact", "--log-level", "debug", "entities"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_analyze() {
        let cli = Cli::parse_from(["ledact", "analyze", "--policy", "policy.toml", "input.txt"]);
        assert!(matches!(cli.command, Commands::Analyze(_)));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["ledact", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["ledact", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn test_scrub_direction_flag() {
        let cli = Cli::parse_from([
            "ledact",
            "scrub",
            "--policy",
            "p.toml",
            "--direction",
            "inbound",
            "doc.txt",
        ]);
        if let Commands::Scrub(args) = cli.command {
            assert_eq!(args.direction, "inbound");
        } else {
            panic!("expected scrub command");
        }
    }
}
