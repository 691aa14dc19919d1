// Ledact - Legal Text Anonymization Engine
// Copyright (c) 2025 Ledact Contributors
// Licensed under the MIT License

//! # Ledact - Legal Text Anonymization Engine
//!
//! Ledact is a policy-driven anonymization engine for legal documents and
//! conversational text. It scans free-form text for sensitive entities
//! (people, organizations, law firms, case numbers, bar licenses, legal
//! citations, contact details, financial identifiers) and replaces them
//! according to a declarative, direction-aware policy before the text
//! crosses a trust boundary.
//!
//! ## Architecture
//!
//! - [`scrub`] - The anonymization engine: data model, recognizers,
//!   span resolution, replacement strategies, and the [`scrub::Scrubber`]
//!   orchestrator
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration management
//! - [`domain`] - Error taxonomy and result alias
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use ledact::scrub::{config::EngineConfig, policy::{Direction, Policy}, scrubber::Scrubber};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Build the engine once; share it across calls.
//! let scrubber = Scrubber::new(&EngineConfig::default())?;
//!
//! // Policies are validated at construction, never at scrub time.
//! let policy = Policy::from_value(&json!({
//!     "outbound_entities": ["LAW_FIRM", "EMAIL_ADDRESS"],
//!     "confidence_threshold": 0.7
//! }))?;
//!
//! let outcome = scrubber.scrub(
//!     "Forward to Smith & Associates, LLP at intake@firm.com",
//!     &policy,
//!     Direction::Outbound,
//! )?;
//!
//! assert!(!outcome.text.contains("intake@firm.com"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Availability and degraded mode
//!
//! The optional deep entity-recognition backend is resolved once at engine
//! construction. When it is absent the engine keeps running on the
//! pattern-based recognizers alone and reports the state via
//! [`scrub::Scrubber::deep_backend_available`]; it never degrades to
//! silent pass-through. If no recognizer at all can be constructed the
//! engine fails closed with [`domain::LedactError::NoRecognizers`].
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`]:
//!
//! ```rust
//! use ledact::domain::Result;
//! use ledact::scrub::policy::Policy;
//!
//! fn load(raw: &serde_json::Value) -> Result<Policy> {
//!     // Policy errors convert into LedactError with ?
//!     Ok(Policy::from_value(raw)?)
//! }
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod scrub;
