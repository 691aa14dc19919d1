//! Analysis reporting
//!
//! Formatted summaries of detection-only runs, used by the CLI `analyze`
//! command and for observability.

use crate::scrub::model::{EntitySpan, EntityType};
use crate::scrub::policy::Direction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Longest sample text shown before truncation.
const SAMPLE_MAX_LEN: usize = 40;

/// Most samples kept per report.
const MAX_SAMPLES: usize = 20;

/// Summary of an analysis pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Direction the analysis was scoped to
    pub direction: Direction,
    /// Total resolved spans
    pub total_spans: usize,
    /// Span counts by entity type
    pub counts_by_type: BTreeMap<EntityType, usize>,
    /// Sample detections (truncated for display)
    pub samples: Vec<AnalysisSample>,
}

/// One sample detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSample {
    /// Category of the detection
    pub entity_type: EntityType,
    /// Matched text, truncated to a display length
    pub text: String,
    /// Confidence score
    pub score: f32,
    /// Start byte offset
    pub start: usize,
    /// End byte offset
    pub end: usize,
}

impl AnalysisReport {
    /// Build a report from resolved spans.
    pub fn from_spans(direction: Direction, spans: &[EntitySpan]) -> Self {
        let mut counts_by_type = BTreeMap::new();
        for span in spans {
            *counts_by_type.entry(span.entity_type).or_insert(0) += 1;
        }

        let samples = spans
            .iter()
            .take(MAX_SAMPLES)
            .map(|span| AnalysisSample {
                entity_type: span.entity_type,
                text: truncate(&span.text, SAMPLE_MAX_LEN),
                score: span.score,
                start: span.start,
                end: span.end,
            })
            .collect();

        Self {
            direction,
            total_spans: spans.len(),
            counts_by_type,
            samples,
        }
    }

    /// Format the report for console output.
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push_str("Analysis report\n");
        output.push_str(&format!("  Direction:      {}\n", self.direction));
        output.push_str(&format!("  Entities found: {}\n", self.total_spans));

        if !self.counts_by_type.is_empty() {
            output.push_str("\nBy type:\n");
            let mut counts: Vec<_> = self.counts_by_type.iter().collect();
            counts.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
            for (entity_type, count) in counts {
                output.push_str(&format!("  {:<20} {:>5}\n", entity_type.label(), count));
            }
        }

        if !self.samples.is_empty() {
            output.push_str("\nSamples:\n");
            for sample in &self.samples {
                output.push_str(&format!(
                    "  [{:>5}..{:<5}] {:<20} {:.2}  {:?}\n",
                    sample.start,
                    sample.end,
                    sample.entity_type.label(),
                    sample.score,
                    sample.text
                ));
            }
        }

        output
    }

    /// Format the report as pretty JSON.
    pub fn format_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
