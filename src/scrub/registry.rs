//! Recognizer registry
//!
//! Owns the set of active recognizers and the availability/fallback
//! contract: legal-specific pattern recognizers must function even when the
//! deep backend is absent (degraded-but-functional), and if the full
//! pattern library cannot be loaded the registry falls back to a minimal
//! baseline identifier set. Only when no recognizer at all can be
//! constructed does construction fail - the engine fails closed rather
//! than silently passing text through.

use crate::domain::errors::LedactError;
use crate::domain::result::Result;
use crate::scrub::config::EngineConfig;
use crate::scrub::model::{EntitySpan, EntityType};
use crate::scrub::recognizer::backend::LexiconNerBackend;
use crate::scrub::recognizer::model_recognizer::ModelRecognizer;
use crate::scrub::recognizer::pattern_recognizer::PatternRecognizer;
use crate::scrub::recognizer::patterns::PatternRegistry;
use crate::scrub::recognizer::Recognizer;
use std::collections::BTreeSet;
use std::panic::AssertUnwindSafe;

/// Ordered collection of active recognizers.
pub struct RecognizerRegistry {
    recognizers: Vec<Box<dyn Recognizer>>,
    deep_backend_available: bool,
    degraded: bool,
}

impl std::fmt::Debug for RecognizerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecognizerRegistry")
            .field("recognizers", &self.recognizers.len())
            .field("deep_backend_available", &self.deep_backend_available)
            .field("degraded", &self.degraded)
            .finish()
    }
}

impl RecognizerRegistry {
    /// Build the registry from engine configuration.
    ///
    /// Fallback ladder: configured/full pattern set, then the minimal
    /// baseline set, then an explicit [`LedactError::NoRecognizers`]. The
    /// deep backend is resolved here exactly once; a load failure is
    /// recorded as unavailable, never propagated to scrub calls.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let mut recognizers: Vec<Box<dyn Recognizer>> = Vec::new();
        let mut degraded = false;

        let pattern_recognizer = match &config.pattern_library {
            Some(path) => PatternRegistry::from_file(path)
                .map(|registry| PatternRecognizer::with_registry("custom_patterns", registry)),
            None => PatternRecognizer::new(),
        };

        match pattern_recognizer {
            Ok(recognizer) => recognizers.push(Box::new(recognizer)),
            Err(e) => {
                tracing::error!(error = %e, "pattern library failed to load, falling back to baseline set");
                degraded = true;
                match PatternRecognizer::baseline() {
                    Ok(recognizer) => recognizers.push(Box::new(recognizer)),
                    Err(e) => {
                        tracing::error!(error = %e, "baseline pattern set failed to load");
                    }
                }
            }
        }

        let mut deep_backend_available = false;
        if config.deep_backend_enabled {
            let backend = match &config.lexicon {
                Some(path) => LexiconNerBackend::load(path),
                None => LexiconNerBackend::embedded(),
            };
            match backend {
                Ok(backend) => {
                    recognizers.push(Box::new(ModelRecognizer::new(Box::new(backend))));
                    deep_backend_available = true;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "deep backend unavailable, running pattern-only");
                }
            }
        }

        if recognizers.is_empty() {
            return Err(LedactError::NoRecognizers);
        }

        Ok(Self {
            recognizers,
            deep_backend_available,
            degraded,
        })
    }

    /// Build a registry from explicit recognizers (dependency injection).
    pub fn with_recognizers(
        recognizers: Vec<Box<dyn Recognizer>>,
        deep_backend_available: bool,
    ) -> Result<Self> {
        if recognizers.is_empty() {
            return Err(LedactError::NoRecognizers);
        }
        Ok(Self {
            recognizers,
            deep_backend_available,
            degraded: false,
        })
    }

    /// True iff at least the pattern-based recognizers initialized.
    pub fn is_available(&self) -> bool {
        !self.recognizers.is_empty()
    }

    /// Whether the optional deep backend loaded.
    pub fn deep_backend_available(&self) -> bool {
        self.deep_backend_available
    }

    /// True when running on the minimal baseline set instead of the full
    /// pattern library.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Union of entity types the active recognizers can produce.
    pub fn supported_entities(&self) -> BTreeSet<EntityType> {
        self.recognizers
            .iter()
            .flat_map(|r| r.entity_types().iter().copied())
            .collect()
    }

    /// Fan out to all recognizers in registration order, concatenating
    /// their results. Spans are raw: possibly overlapping, not yet
    /// resolved. A panicking recognizer is isolated and skipped.
    pub fn scan(&self, text: &str) -> Vec<EntitySpan> {
        let mut spans = Vec::new();

        for recognizer in &self.recognizers {
            let found = std::panic::catch_unwind(AssertUnwindSafe(|| recognizer.find(text)));
            match found {
                Ok(found) => {
                    debug_assert!(found.iter().all(|s| s.end <= text.len()));
                    spans.extend(found);
                }
                Err(_) => {
                    tracing::warn!(
                        recognizer = recognizer.name(),
                        "recognizer panicked, skipping"
                    );
                }
            }
        }

        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrub::model::RecognizerSource;

    struct PanickingRecognizer;

    impl Recognizer for PanickingRecognizer {
        fn name(&self) -> &str {
            "panicking"
        }

        fn entity_types(&self) -> &[EntityType] {
            &[EntityType::Person]
        }

        fn find(&self, _text: &str) -> Vec<EntitySpan> {
            panic!("pathological input")
        }
    }

    struct FixedRecognizer;

    impl Recognizer for FixedRecognizer {
        fn name(&self) -> &str {
            "fixed"
        }

        fn entity_types(&self) -> &[EntityType] {
            &[EntityType::EmailAddress]
        }

        fn find(&self, text: &str) -> Vec<EntitySpan> {
            text.find('@')
                .map(|at| {
                    EntitySpan::new(
                        EntityType::EmailAddress,
                        at,
                        at + 1,
                        "@",
                        0.9,
                        RecognizerSource::Pattern("fixed".into()),
                    )
                    .unwrap()
                })
                .into_iter()
                .collect()
        }
    }

    #[test]
    fn test_default_registry_has_pattern_and_model() {
        let registry = RecognizerRegistry::from_config(&EngineConfig::default()).unwrap();
        assert!(registry.is_available());
        assert!(registry.deep_backend_available());
        assert!(!registry.is_degraded());

        let entities = registry.supported_entities();
        assert!(entities.contains(&EntityType::LawFirm));
        assert!(entities.contains(&EntityType::Person));
    }

    #[test]
    fn test_deep_backend_disabled() {
        let config = EngineConfig {
            deep_backend_enabled: false,
            ..Default::default()
        };
        let registry = RecognizerRegistry::from_config(&config).unwrap();
        assert!(registry.is_available());
        assert!(!registry.deep_backend_available());
    }

    #[test]
    fn test_missing_lexicon_degrades_not_fails() {
        let config = EngineConfig {
            lexicon: Some("/nonexistent/lexicon.toml".into()),
            ..Default::default()
        };
        let registry = RecognizerRegistry::from_config(&config).unwrap();
        assert!(registry.is_available());
        assert!(!registry.deep_backend_available());
    }

    #[test]
    fn test_broken_pattern_library_falls_back_to_baseline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "this is not a pattern library").unwrap();

        let config = EngineConfig {
            pattern_library: Some(path),
            deep_backend_enabled: false,
            ..Default::default()
        };
        let registry = RecognizerRegistry::from_config(&config).unwrap();
        assert!(registry.is_available());
        assert!(registry.is_degraded());

        let entities = registry.supported_entities();
        assert!(entities.contains(&EntityType::EmailAddress));
        assert!(!entities.contains(&EntityType::LawFirm));
    }

    #[test]
    fn test_empty_registry_fails_closed() {
        let err = RecognizerRegistry::with_recognizers(Vec::new(), false).unwrap_err();
        assert!(matches!(err, LedactError::NoRecognizers));
    }

    #[test]
    fn test_panicking_recognizer_is_isolated() {
        let registry = RecognizerRegistry::with_recognizers(
            vec![Box::new(PanickingRecognizer), Box::new(FixedRecognizer)],
            false,
        )
        .unwrap();

        let spans = registry.scan("mail me @ noon");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].entity_type, EntityType::EmailAddress);
    }

    #[test]
    fn test_scan_preserves_registration_order() {
        let registry = RecognizerRegistry::from_config(&EngineConfig::default()).unwrap();
        let spans = registry.scan("counsel Jennifer Martinez, Esq. at lawyer@firm.com");
        // Pattern recognizer registers before the model recognizer.
        let first_model = spans
            .iter()
            .position(|s| matches!(s.source, RecognizerSource::Model(_)));
        let last_pattern = spans
            .iter()
            .rposition(|s| matches!(s.source, RecognizerSource::Pattern(_)));
        if let (Some(first_model), Some(last_pattern)) = (first_model, last_pattern) {
            assert!(last_pattern < first_model);
        }
    }
}
