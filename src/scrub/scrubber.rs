//! Scrubber orchestrator
//!
//! Public entry point of the anonymization engine. The pipeline is
//! scan -> policy filter -> resolve -> anonymize: text fans out to every
//! registered recognizer, raw spans are resolved into a disjoint
//! policy-scoped set, and each surviving span is replaced per its type's
//! strategy.
//!
//! The engine is stateless per call aside from the immutable policy and
//! the registry's static recognizer set; one scrubber may serve concurrent
//! calls from many tasks with no extra locking.
//!
//! # Examples
//!
//! ```
//! use ledact::scrub::{config::EngineConfig, policy::{Direction, Policy}, scrubber::Scrubber};
//! use serde_json::json;
//!
//! # fn example() -> anyhow::Result<()> {
//! let scrubber = Scrubber::new(&EngineConfig::default())?;
//! let policy = Policy::from_value(&json!({
//!     "outbound_entities": ["EMAIL_ADDRESS"],
//!     "confidence_threshold": 0.7
//! }))?;
//!
//! let outcome = scrubber.scrub("reach me at a@b.com", &policy, Direction::Outbound)?;
//! assert_eq!(outcome.text, "reach me at [EMAIL_ADDRESS]");
//! # Ok(())
//! # }
//! ```

use crate::domain::errors::LedactError;
use crate::domain::result::Result;
use crate::scrub::anonymizer::Anonymizer;
use crate::scrub::audit::{AuditLogger, ScrubRecord};
use crate::scrub::config::EngineConfig;
use crate::scrub::model::{EntitySpan, EntityType};
use crate::scrub::policy::{Direction, Policy};
use crate::scrub::registry::RecognizerRegistry;
use crate::scrub::resolver::SpanResolver;
use std::collections::BTreeSet;
use std::sync::OnceLock;
use std::time::Instant;

/// Scrubbed text plus its audit record.
#[derive(Debug, Clone)]
pub struct ScrubOutcome {
    /// The text with every resolved span replaced
    pub text: String,
    /// What was replaced, in document order
    pub record: ScrubRecord,
}

/// The anonymization engine.
pub struct Scrubber {
    registry: RecognizerRegistry,
    anonymizer: Anonymizer,
    audit_logger: Option<AuditLogger>,
}

static SHARED: OnceLock<Scrubber> = OnceLock::new();

impl Scrubber {
    /// Build a scrubber from engine configuration.
    ///
    /// Fails closed: if no recognizer at all can be constructed, including
    /// the minimal fallback set, this returns
    /// [`LedactError::NoRecognizers`] instead of producing an engine that
    /// would pass text through unscrubbed.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;

        let registry = RecognizerRegistry::from_config(config)?;

        let audit_logger = if config.audit.enabled {
            Some(AuditLogger::new(
                config.audit.log_path.clone(),
                config.audit.json_format,
                true,
            )?)
        } else {
            None
        };

        tracing::info!(
            deep_backend = registry.deep_backend_available(),
            degraded = registry.is_degraded(),
            entities = registry.supported_entities().len(),
            "scrub engine ready"
        );

        Ok(Self {
            registry,
            anonymizer: Anonymizer::new(),
            audit_logger,
        })
    }

    /// Build a scrubber over an explicit registry (dependency injection;
    /// no audit logging).
    pub fn with_registry(registry: RecognizerRegistry) -> Self {
        Self {
            registry,
            anonymizer: Anonymizer::new(),
            audit_logger: None,
        }
    }

    /// Process-wide scrubber over the default configuration, built lazily
    /// and exactly once. Convenience for application boundaries that don't
    /// thread a handle through; library callers should construct and own
    /// their scrubber via [`Scrubber::new`].
    ///
    /// # Panics
    ///
    /// Panics if even the embedded default recognizers cannot be built,
    /// which indicates a defective build rather than a runtime condition.
    pub fn shared() -> &'static Scrubber {
        SHARED.get_or_init(|| {
            Scrubber::new(&EngineConfig::default()).expect("embedded default recognizers")
        })
    }

    /// True iff at least the pattern-based recognizers are active.
    pub fn is_available(&self) -> bool {
        self.registry.is_available()
    }

    /// Whether the optional deep backend loaded.
    pub fn deep_backend_available(&self) -> bool {
        self.registry.deep_backend_available()
    }

    /// Entity types the active recognizers can produce. Callers use this
    /// to build policy configuration surfaces.
    pub fn supported_entities(&self) -> BTreeSet<EntityType> {
        self.registry.supported_entities()
    }

    /// Detection without substitution: scan, policy-filter, and resolve,
    /// returning the ordered disjoint spans. The input is not mutated.
    pub fn analyze(&self, text: &str, policy: &Policy, direction: Direction) -> Vec<EntitySpan> {
        let raw = self.registry.scan(text);
        SpanResolver::new(policy, direction).resolve(raw)
    }

    /// Full pipeline: scan, filter by direction, resolve, anonymize.
    ///
    /// Returns the scrubbed text and the audit record, or an explicit
    /// error. There is no code path that returns the original text labeled
    /// as scrubbed.
    pub fn scrub(&self, text: &str, policy: &Policy, direction: Direction) -> Result<ScrubOutcome> {
        if !self.registry.is_available() {
            return Err(LedactError::NoRecognizers);
        }

        let start = Instant::now();
        let resolved = self.analyze(text, policy, direction);
        let (scrubbed, substitutions) = self.anonymizer.apply(text, &resolved, policy);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let record = ScrubRecord::new(direction, substitutions, elapsed_ms);

        if let Some(logger) = &self.audit_logger {
            logger.log_scrub(&record)?;
        }

        tracing::debug!(
            scrub_id = %record.id,
            direction = %direction,
            substitutions = record.total_substitutions(),
            elapsed_ms,
            "scrub complete"
        );

        Ok(ScrubOutcome {
            text: scrubbed,
            record,
        })
    }

    /// Scrub a batch of documents, isolating per-document failures: a
    /// document that fails is logged and skipped, never emitted
    /// unscrubbed.
    pub fn scrub_batch(
        &self,
        texts: &[String],
        policy: &Policy,
        direction: Direction,
    ) -> Vec<ScrubOutcome> {
        let mut outcomes = Vec::with_capacity(texts.len());
        for text in texts {
            match self.scrub(text, policy, direction) {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    tracing::error!(error = %e, "failed to scrub document, skipping");
                }
            }
        }
        outcomes
    }
}
