//! Anonymization strategies
//!
//! Each resolved span is replaced according to its entity type's configured
//! strategy. Tag substitution is the default; partial masking, salted hash
//! tokens, and synthetic replacement are selected per type through the
//! policy's `strategy_overrides`.

pub mod hash;
pub mod mask;
pub mod synthetic;
pub mod tag;

use crate::domain::errors::PolicyError;
use crate::scrub::audit::AppliedSubstitution;
use crate::scrub::model::EntitySpan;
use crate::scrub::policy::Policy;
use serde::{Deserialize, Serialize};

/// Replacement method applied to a detected span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Fixed bracketed label, e.g. `[LAW_FIRM]`
    Tag,
    /// Keep a short prefix/suffix, mask the interior
    Mask,
    /// Stable salted hash token preserving referential identity
    HashToken,
    /// Plausible but unrelated value of the same syntactic shape
    Synthetic,
}

impl StrategyKind {
    /// Parse a strategy name as used in policy configuration.
    pub fn parse(s: &str) -> Result<Self, PolicyError> {
        match s.to_lowercase().as_str() {
            "tag" => Ok(Self::Tag),
            "mask" => Ok(Self::Mask),
            "hash" | "hash_token" => Ok(Self::HashToken),
            "synthetic" => Ok(Self::Synthetic),
            other => Err(PolicyError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Trait for anonymization strategy implementations.
pub trait AnonymizerStrategy: Send + Sync {
    /// Which strategy this is.
    fn kind(&self) -> StrategyKind;

    /// Replacement text for a resolved span.
    fn replacement(&self, span: &EntitySpan) -> String;
}

/// Applies the policy-selected strategy to each resolved span.
pub struct Anonymizer {
    tag: tag::TagStrategy,
    mask: mask::MaskStrategy,
    hash: hash::HashTokenStrategy,
    synthetic: synthetic::SyntheticStrategy,
}

impl Anonymizer {
    /// Create an anonymizer with all strategies ready.
    pub fn new() -> Self {
        Self {
            tag: tag::TagStrategy::new(),
            mask: mask::MaskStrategy::new(),
            hash: hash::HashTokenStrategy::new(),
            synthetic: synthetic::SyntheticStrategy::new(),
        }
    }

    fn strategy(&self, kind: StrategyKind) -> &dyn AnonymizerStrategy {
        match kind {
            StrategyKind::Tag => &self.tag,
            StrategyKind::Mask => &self.mask,
            StrategyKind::HashToken => &self.hash,
            StrategyKind::Synthetic => &self.synthetic,
        }
    }

    /// Replace every resolved span in `text`, right to left so earlier
    /// offsets stay valid while later replacements change the length.
    ///
    /// `spans` must be the resolver's output: ordered by start, disjoint.
    /// Returns the scrubbed text and the substitutions in document order.
    pub fn apply(
        &self,
        text: &str,
        spans: &[EntitySpan],
        policy: &Policy,
    ) -> (String, Vec<AppliedSubstitution>) {
        let mut output = text.to_string();
        let mut substitutions = Vec::with_capacity(spans.len());

        for span in spans.iter().rev() {
            let strategy = self.strategy(policy.strategy_for(span.entity_type));
            let replacement = strategy.replacement(span);
            output.replace_range(span.start..span.end, &replacement);
            substitutions.push(AppliedSubstitution {
                entity_type: span.entity_type,
                original_text: span.text.clone(),
                replacement_text: replacement,
                confidence: span.score,
                start: span.start,
                end: span.end,
            });
        }

        substitutions.reverse();
        (output, substitutions)
    }
}

impl Default for Anonymizer {
    fn default() -> Self {
        Self::new()
    }
}
