//! Configuration management
//!
//! TOML configuration with `${VAR}` environment substitution and
//! `LEDACT_*` environment overrides, validated fail-fast at load time.

pub mod loader;
pub mod schema;

pub use loader::load_config;
pub use schema::{ApplicationConfig, LedactConfig, LoggingConfig};
