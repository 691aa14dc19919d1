//! Pattern-based recognizer
//!
//! Deterministic rules over lexical/structural patterns: regex matching
//! plus lightweight context checks (corporate-suffix windows, caption cues,
//! checksum validators). Always available; this is the recognizer family
//! the availability contract is anchored on.

use super::patterns::PatternRegistry;
use super::Recognizer;
use crate::domain::errors::RecognizerError;
use crate::scrub::model::{EntitySpan, EntityType, RecognizerSource};
use std::sync::Arc;

/// Recognizer driving a compiled pattern rule set.
pub struct PatternRecognizer {
    registry: Arc<PatternRegistry>,
    name: String,
    types: Vec<EntityType>,
}

impl PatternRecognizer {
    /// Create a recognizer over the embedded default library.
    pub fn new() -> Result<Self, RecognizerError> {
        Ok(Self::with_registry("legal_patterns", PatternRegistry::default_patterns()?))
    }

    /// Create a recognizer over the minimal baseline set.
    pub fn baseline() -> Result<Self, RecognizerError> {
        Ok(Self::with_registry("baseline_patterns", PatternRegistry::baseline_patterns()?))
    }

    /// Create a recognizer over a custom rule set.
    pub fn with_registry(name: impl Into<String>, registry: PatternRegistry) -> Self {
        let types = registry.entity_types();
        Self {
            registry: Arc::new(registry),
            name: name.into(),
            types,
        }
    }
}

impl Recognizer for PatternRecognizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn entity_types(&self) -> &[EntityType] {
        &self.types
    }

    fn find(&self, text: &str) -> Vec<EntitySpan> {
        let mut spans = Vec::new();

        for rule in self.registry.rules() {
            for matcher in &rule.matchers {
                for (start, end) in matcher.matches(text) {
                    if start >= end {
                        continue;
                    }
                    let matched = &text[start..end];

                    if let Some(validator) = &rule.validator {
                        if !validator.accepts(matched) {
                            continue;
                        }
                    }

                    let score = match &rule.cue {
                        Some(cue) if cue.present_near(text, start, end) => cue.confidence(),
                        _ => rule.confidence,
                    };

                    match EntitySpan::new(
                        rule.entity_type,
                        start,
                        end,
                        matched,
                        score,
                        RecognizerSource::Pattern(rule.name.clone()),
                    ) {
                        Ok(span) => spans.push(span),
                        Err(e) => {
                            tracing::warn!(rule = %rule.name, error = %e, "dropping invalid span");
                        }
                    }
                }
            }
        }

        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans_of(text: &str) -> Vec<EntitySpan> {
        PatternRecognizer::new().unwrap().find(text)
    }

    #[test]
    fn test_law_firm_requires_suffix() {
        let spans = spans_of("Meet at Smith & Associates, LLP tomorrow");
        let firm: Vec<_> = spans
            .iter()
            .filter(|s| s.entity_type == EntityType::LawFirm)
            .collect();
        assert!(!firm.is_empty());
        assert!(firm.iter().any(|s| s.text.contains("LLP")));

        let spans = spans_of("Meet at Smith Consulting tomorrow");
        assert!(spans.iter().all(|s| s.entity_type != EntityType::LawFirm));
    }

    #[test]
    fn test_docket_cue_boosts_confidence() {
        let with_cue = spans_of("Case No. 1:23-cv-12345 is pending");
        let docket = with_cue
            .iter()
            .find(|s| s.entity_type == EntityType::CourtCase)
            .unwrap();
        assert!(docket.score > 0.9);

        let without_cue = spans_of("reference 1:23-cv-12345 attached");
        let docket = without_cue
            .iter()
            .find(|s| s.entity_type == EntityType::CourtCase)
            .unwrap();
        assert!(docket.score < 0.9);
    }

    #[test]
    fn test_luhn_gates_credit_card() {
        let valid = spans_of("card 4532 0151 1283 0366 on file");
        assert!(valid.iter().any(|s| s.entity_type == EntityType::CreditCard));

        let invalid = spans_of("card 4532 0151 1283 0367 on file");
        assert!(invalid.iter().all(|s| s.entity_type != EntityType::CreditCard));
    }

    #[test]
    fn test_esquire_name_detected() {
        let spans = spans_of("counsel Jennifer Martinez, Esq. appeared");
        let professional: Vec<_> = spans
            .iter()
            .filter(|s| s.entity_type == EntityType::LegalProfessional)
            .collect();
        assert!(professional.iter().any(|s| s.text.contains("Martinez")));
    }

    #[test]
    fn test_bar_license_jurisdiction_prefix() {
        let spans = spans_of("admitted under CA Bar No. 123456 since 2015");
        let bar = spans
            .iter()
            .find(|s| s.entity_type == EntityType::BarLicense)
            .unwrap();
        assert!(bar.text.starts_with("CA Bar"));
    }

    #[test]
    fn test_spans_carry_pattern_source() {
        let spans = spans_of("write to lawyer@firm.com");
        let email = spans
            .iter()
            .find(|s| s.entity_type == EntityType::EmailAddress)
            .unwrap();
        assert!(matches!(&email.source, RecognizerSource::Pattern(rule) if rule == "email_address"));
    }

    #[test]
    fn test_offsets_match_text() {
        let text = "Email: lawyer@firm.com.";
        let spans = spans_of(text);
        for span in spans {
            assert_eq!(&text[span.start..span.end], span.text);
        }
    }

    #[test]
    fn test_baseline_has_no_legal_types() {
        let recognizer = PatternRecognizer::baseline().unwrap();
        assert!(!recognizer.entity_types().contains(&EntityType::LawFirm));
        let spans = recognizer.find("Email lawyer@firm.com about Smith & Associates, LLP");
        assert!(spans.iter().any(|s| s.entity_type == EntityType::EmailAddress));
        assert!(spans.iter().all(|s| s.entity_type != EntityType::LawFirm));
    }
}
