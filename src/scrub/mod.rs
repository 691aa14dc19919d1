//! Anonymization engine
//!
//! Policy-driven pipeline that scans legal documents and conversational
//! text for sensitive entities and replaces them before the text crosses a
//! trust boundary (into a local model, or out to a user, export, or log).
//!
//! # Architecture
//!
//! - **Recognizers**: pattern-based detectors (always available) plus an
//!   optional deep entity-recognition backend
//! - **Registry**: fan-out scanning and the availability/fallback contract
//! - **Resolver**: span conflict resolution and confidence filtering
//! - **Anonymizer**: per-type replacement strategies (tag, mask, hash
//!   token, synthetic)
//! - **Scrubber**: the public orchestrator
//!
//! # Usage
//!
//! ```rust,ignore
//! use ledact::scrub::{config::EngineConfig, policy::{Direction, Policy}, scrubber::Scrubber};
//!
//! let scrubber = Scrubber::new(&EngineConfig::default())?;
//! let policy = Policy::from_toml_str(policy_toml)?;
//! let outcome = scrubber.scrub(text, &policy, Direction::Outbound)?;
//! ```

pub mod anonymizer;
pub mod audit;
pub mod config;
pub mod model;
pub mod policy;
pub mod recognizer;
pub mod registry;
pub mod report;
pub mod resolver;
pub mod scrubber;

// Re-export main types
pub use audit::{AppliedSubstitution, ScrubRecord};
pub use config::EngineConfig;
pub use model::{EntitySpan, EntityType, RecognizerSource};
pub use policy::{Direction, Policy};
pub use report::AnalysisReport;
pub use scrubber::{ScrubOutcome, Scrubber};
