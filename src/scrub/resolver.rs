//! Span conflict resolution
//!
//! Turns the raw, possibly-overlapping span sequence from a scan into an
//! ordered, non-overlapping set honoring policy scope and confidence.
//!
//! Resolution order for two overlapping spans: higher score, then longer
//! span, then higher policy-resolved type priority, then first-registered.
//! The priority ladder is documented on
//! [`EntityType::default_priority`](crate::scrub::model::EntityType::default_priority)
//! and overridable per policy.

use crate::scrub::model::EntitySpan;
use crate::scrub::policy::{Direction, Policy};
use std::cmp::Ordering;

/// Resolves raw spans against a policy and direction.
pub struct SpanResolver<'p> {
    policy: &'p Policy,
    direction: Direction,
}

impl<'p> SpanResolver<'p> {
    /// Create a resolver for one policy/direction pairing.
    pub fn new(policy: &'p Policy, direction: Direction) -> Self {
        Self { policy, direction }
    }

    /// Resolve raw spans into an ordered, disjoint list.
    ///
    /// 1. Drop spans outside the direction's entity set or below the
    ///    effective per-type threshold.
    /// 2. Deduplicate identical (bounds, type) spans keeping the highest
    ///    score.
    /// 3. Sort by start ascending, end descending (longest first on ties).
    /// 4. Sweep left to right keeping the winner of each overlap.
    pub fn resolve(&self, spans: Vec<EntitySpan>) -> Vec<EntitySpan> {
        let scope = self.policy.entities_for(self.direction);

        let mut candidates: Vec<EntitySpan> = spans
            .into_iter()
            .filter(|span| {
                scope.contains(&span.entity_type)
                    && span.score >= self.policy.effective_threshold(span.entity_type)
            })
            .collect();

        // Identical bounds and type collapse to the highest score.
        candidates.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then(b.end.cmp(&a.end))
                .then(a.entity_type.cmp(&b.entity_type))
                .then(b.score.total_cmp(&a.score))
        });
        candidates.dedup_by(|next, kept| {
            kept.start == next.start && kept.end == next.end && kept.entity_type == next.entity_type
        });

        let mut resolved: Vec<EntitySpan> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match resolved.last() {
                Some(last) if last.overlaps(&candidate) => {
                    if self.beats(&candidate, last) {
                        resolved.pop();
                        resolved.push(candidate);
                    }
                }
                _ => resolved.push(candidate),
            }
        }

        resolved
    }

    /// True if `challenger` wins the overlap against `incumbent`.
    fn beats(&self, challenger: &EntitySpan, incumbent: &EntitySpan) -> bool {
        let ordering = challenger
            .score
            .total_cmp(&incumbent.score)
            .then(challenger.len().cmp(&incumbent.len()))
            .then(
                self.policy
                    .priority_of(challenger.entity_type)
                    .cmp(&self.policy.priority_of(incumbent.entity_type)),
            );
        ordering == Ordering::Greater
    }
}
