//! Analyze command implementation
//!
//! Detection without substitution, for inspection and policy tuning.

use super::{load_config_or_default, load_policy, read_input};
use crate::scrub::policy::Direction;
use crate::scrub::report::AnalysisReport;
use crate::scrub::scrubber::Scrubber;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the analyze command
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Input file; stdin when omitted or `-`
    pub input: Option<PathBuf>,

    /// Policy file (TOML)
    #[arg(short, long)]
    pub policy: PathBuf,

    /// Flow direction: inbound or outbound
    #[arg(short, long, default_value = "outbound")]
    pub direction: String,

    /// Emit the report as JSON instead of the console format
    #[arg(long)]
    pub json: bool,
}

impl AnalyzeArgs {
    /// Execute the analyze command
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
        let text = read_input(self.input.as_deref())?;
        let spans = scrubber.analyze(&text, &policy, direction);

        let report = AnalysisReport::from_spans(direction, &spans);
        if self.json {
            println!("{}", report.format_json()?);
        } else {
            print!("{}", report.format_console());
        }

        Ok(0)
    }
}
