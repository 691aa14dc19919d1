// Ledact - Legal Text Anonymization Engine
// Copyright (c) 2025 Ledact Contributors
// Licensed under the MIT License

use clap::Parser;
use ledact::cli::{Cli, Commands};
use ledact::config::LoggingConfig;
use ledact::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Console-only logging for the CLI; file logging is driven by the
    // configuration file for embedded/service use.
    let log_level = cli.log_level.as_deref().unwrap_or("info");
    let logging_config = LoggingConfig::default();
    if let Err(e) = init_logging(log_level, &logging_config) {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(5);
    }

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        "ledact - legal text anonymization engine"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "command execution failed");
            eprintln!("Error: {e:#}");
            5
        }
    };

    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Scrub(args) => args.execute(&cli.config).await,
        Commands::Analyze(args) => args.execute(&cli.config).await,
        Commands::Entities(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
