//! Init command implementation
//!
//! Generates sample configuration and policy files.

use clap::Args;
use std::fs;
use std::path::Path;

const SAMPLE_CONFIG: &str = r#"# ledact configuration

[application]
name = "ledact"
log_level = "info"

[engine]
# Omit to use the embedded pattern library and lexicon.
# pattern_library = "patterns/legal_patterns.toml"
# lexicon = "patterns/ner_lexicon.toml"
deep_backend_enabled = true

[engine.audit]
enabled = true
log_path = "./audit/scrub.log"
json_format = true

[logging]
file_enabled = false
file_path = "./logs"
file_rotation = "daily"
"#;

const SAMPLE_POLICY: &str = r#"# ledact scrub policy
#
# Entity types in scope per direction; confidence thresholds and
# replacement strategies per type.

inbound_entities = [
    "PERSON",
    "ORGANIZATION",
    "LAW_FIRM",
    "COURT_CASE",
    "LEGAL_PROFESSIONAL",
    "BAR_LICENSE",
    "EMAIL_ADDRESS",
    "PHONE_NUMBER",
    "CREDIT_CARD",
    "US_SSN",
]

outbound_entities = [
    "LAW_FIRM",
    "COURT_CASE",
    "LEGAL_PROFESSIONAL",
    "EMAIL_ADDRESS",
    "PHONE_NUMBER",
]

confidence_threshold = 0.7

[threshold_overrides]
PERSON = 0.6

[strategy_overrides]
# tag (default), mask, hash, synthetic
BAR_LICENSE = "mask"
PERSON = "hash"
"#;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path for the configuration file
    #[arg(short, long, default_value = "ledact.toml")]
    pub output: String,

    /// Path for the sample policy file
    #[arg(long, default_value = "policy.toml")]
    pub policy_output: String,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "initializing configuration");

        for (path, content) in [
            (&self.output, SAMPLE_CONFIG),
            (&self.policy_output, SAMPLE_POLICY),
        ] {
            if Path::new(path).exists() && !self.force {
                eprintln!("File already exists: {path} (use --force to overwrite)");
                return Ok(2);
            }
            fs::write(path, content)?;
            println!("Created {path}");
        }

        println!();
        println!("Next steps:");
        println!("  1. Edit {} to fit your deployment", self.output);
        println!("  2. Adjust the entity sets in {}", self.policy_output);
        println!("  3. Validate: ledact validate-config --policy {}", self.policy_output);
        println!("  4. Scrub: ledact scrub --policy {} document.txt", self.policy_output);

        Ok(0)
    }

    /// Sample policy content, exposed for validation tests.
    #[cfg(test)]
    pub(crate) fn sample_policy() -> &'static str {
        SAMPLE_POLICY
    }
}
