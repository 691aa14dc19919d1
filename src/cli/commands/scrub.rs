//! Scrub command implementation

use super::{load_config_or_default, load_policy, read_input};
use crate::scrub::policy::Direction;
use crate::scrub::scrubber::Scrubber;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the scrub command
#[derive(Args, Debug)]
pub struct ScrubArgs {
    /// Input file; stdin when omitted or `-`
    pub input: Option<PathBuf>,

    /// Policy file (TOML)
    #[arg(short, long)]
    pub policy: PathBuf,

    /// Flow direction: inbound or outbound
    #[arg(short, long, default_value = "outbound")]
    pub direction: String,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print a substitution summary to stderr
    #[arg(long)]
    pub summary: bool,
}

impl ScrubArgs {
    /// Execute the scrub command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = load_config_or_default(config_path)?;
        let direction = match Direction::parse(&self.direction) {
            Ok(direction) => direction,
            Err(e) => {
                eprintln!("Error: {e}");
                return Ok(2);
            }
        };

        let policy = match load_policy(&self.policy) {
            Ok(policy) => policy,
            Err(e) => {
                eprintln!("Error: {e:#}");
                return Ok(2);
            }
        };

        let scrubber = Scrubber::new(&config.engine)?;
        if !scrubber.deep_backend_available() {
            tracing::warn!("deep backend unavailable, running pattern-only (degraded mode)");
        }

        let text = read_input(self.input.as_deref())?;
        let outcome = scrubber.scrub(&text, &policy, direction)?;

        match &self.output {
            Some(path) => std::fs::write(path, &outcome.text)?,
            None => print!("{}", outcome.text),
        }

        if self.summary {
            eprintln!(
                "scrubbed {} entities in {}ms (scrub id {})",
                outcome.record.total_substitutions(),
                outcome.record.elapsed_ms,
                outcome.record.id
            );
            for (entity_type, count) in &outcome.record.counts {
                eprintln!("  {:<20} {count}", entity_type.label());
            }
        }

        Ok(0)
    }
}
