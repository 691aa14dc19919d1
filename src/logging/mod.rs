//! Logging and observability
//!
//! Structured logging built on `tracing`: console output always, JSON
//! rolling-file output when enabled in configuration.

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
