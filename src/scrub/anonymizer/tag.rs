//! Tag substitution strategy

use super::{AnonymizerStrategy, StrategyKind};
use crate::scrub::model::EntitySpan;

/// Replaces a span with its fixed bracketed label, e.g. `[LAW_FIRM]`.
///
/// Deterministic; reversible only via the audit record, never via the
/// output text.
pub struct TagStrategy;

impl TagStrategy {
    /// Create a new tag strategy.
    pub fn new() -> Self {
        Self
    }
}

impl AnonymizerStrategy for TagStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Tag
    }

    fn replacement(&self, span: &EntitySpan) -> String {
        format!("[{}]", span.entity_type.label())
    }
}

impl Default for TagStrategy {
    fn default() -> Self {
        Self::new()
    }
}
