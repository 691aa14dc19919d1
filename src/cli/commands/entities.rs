//! Entities command implementation
//!
//! Lists supported entity types and engine availability, for building
//! policy configuration surfaces.

use super::load_config_or_default;
use crate::scrub::scrubber::Scrubber;
use clap::Args;

/// Arguments for the entities command
#[derive(Args, Debug)]
pub struct EntitiesArgs {}

impl EntitiesArgs {
    /// Execute the entities command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = load_config_or_default(config_path)?;
        let scrubber = Scrubber::new(&config.engine)?;

        println!("Engine available:      {}", scrubber.is_available());
        println!("Deep backend loaded:   {}", scrubber.deep_backend_available());
        println!();
        println!("Supported entity types:");
        for entity_type in scrubber.supported_entities() {
            println!("  {}", entity_type.label());
        }

        Ok(0)
    }
}
