//! Model-based recognizer
//!
//! Wraps a [`NerBackend`] for the generic PERSON/ORGANIZATION categories.
//! The backend is resolved once at registry construction; a load failure
//! means the recognizer is simply absent (degraded mode), never a scrub
//! fault. Inference is serialized by a mutex because the underlying model
//! runtime may not be re-entrant; the lock is held only across the
//! backend's own inference step, never across a whole scrub call.

use super::backend::NerBackend;
use super::Recognizer;
use crate::scrub::model::{EntitySpan, EntityType};
use std::sync::Mutex;

/// Recognizer delegating to a deep entity-recognition backend.
pub struct ModelRecognizer {
    backend: Mutex<Box<dyn NerBackend>>,
    name: String,
    types: [EntityType; 2],
}

impl ModelRecognizer {
    /// Wrap a loaded backend.
    pub fn new(backend: Box<dyn NerBackend>) -> Self {
        let name = format!("model_{}", backend.name());
        Self {
            backend: Mutex::new(backend),
            name,
            types: [EntityType::Person, EntityType::Organization],
        }
    }
}

impl Recognizer for ModelRecognizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn entity_types(&self) -> &[EntityType] {
        &self.types
    }

    fn find(&self, text: &str) -> Vec<EntitySpan> {
        let mut guard = match self.backend.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!(recognizer = %self.name, "backend mutex poisoned, recovering");
                poisoned.into_inner()
            }
        };

        match guard.recognize(text) {
            Ok(spans) => spans,
            Err(e) => {
                // Isolated per-recognizer fault: log and yield nothing so
                // the rest of the scan proceeds.
                tracing::warn!(recognizer = %self.name, error = %e, "backend inference failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RecognizerError;
    use crate::scrub::recognizer::backend::LexiconNerBackend;

    struct FailingBackend;

    impl NerBackend for FailingBackend {
        fn name(&self) -> &str {
            "failing"
        }

        fn recognize(&mut self, _text: &str) -> Result<Vec<EntitySpan>, RecognizerError> {
            Err(RecognizerError::Inference("boom".into()))
        }
    }

    #[test]
    fn test_backend_error_is_isolated() {
        let recognizer = ModelRecognizer::new(Box::new(FailingBackend));
        assert!(recognizer.find("Jennifer Martinez").is_empty());
    }

    #[test]
    fn test_find_delegates_to_backend() {
        let backend = LexiconNerBackend::embedded().unwrap();
        let recognizer = ModelRecognizer::new(Box::new(backend));
        let spans = recognizer.find("witness Jennifer Martinez testified");
        assert!(spans.iter().any(|s| s.entity_type == EntityType::Person));
        assert_eq!(recognizer.name(), "model_lexicon");
    }

    #[test]
    fn test_declared_types() {
        let recognizer = ModelRecognizer::new(Box::new(FailingBackend));
        assert_eq!(
            recognizer.entity_types(),
            &[EntityType::Person, EntityType::Organization]
        );
    }
}
