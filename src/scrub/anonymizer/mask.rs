//! Partial mask strategy

use super::{AnonymizerStrategy, StrategyKind};
use crate::scrub::model::EntitySpan;

/// Characters kept at each edge of a masked value.
const EDGE_KEEP: usize = 2;

/// Values this short or shorter are masked in full.
const MIN_MASKABLE: usize = 6;

/// Retains a short prefix and suffix and masks the interior, preserving
/// separators so the result keeps the original format shape. Used for
/// identifiers like bar-license numbers where format plausibility matters
/// for downstream validation display.
pub struct MaskStrategy;

impl MaskStrategy {
    /// Create a new mask strategy.
    pub fn new() -> Self {
        Self
    }

    fn mask_value(value: &str) -> String {
        let chars: Vec<char> = value.chars().collect();
        let keep = if chars.len() > MIN_MASKABLE { EDGE_KEEP } else { 0 };

        chars
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if i < keep || i >= chars.len() - keep {
                    *c
                } else if c.is_alphanumeric() {
                    '*'
                } else {
                    *c
                }
            })
            .collect()
    }
}

impl AnonymizerStrategy for MaskStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Mask
    }

    fn replacement(&self, span: &EntitySpan) -> String {
        Self::mask_value(&span.text)
    }
}

impl Default for MaskStrategy {
    fn default() -> Self {
        Self::new()
    }
}
