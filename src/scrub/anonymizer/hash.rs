//! Deterministic hash token strategy

use super::{AnonymizerStrategy, StrategyKind};
use crate::scrub::model::EntitySpan;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::RngCore;
use secrecy::{ExposeSecret, Secret};
use sha2::{Digest, Sha256};
use std::sync::OnceLock;
use zeroize::Zeroize;

/// Token characters taken from the encoded digest.
const TOKEN_LEN: usize = 10;

/// Process-wide salt material, generated once from entropy and wiped on
/// drop. A fresh process gets a fresh salt, so tokens are stable within a
/// process but not linkable across runs.
#[derive(Zeroize)]
struct SaltBytes([u8; 32]);

static SALT: OnceLock<Secret<SaltBytes>> = OnceLock::new();

fn process_salt() -> &'static Secret<SaltBytes> {
    SALT.get_or_init(|| {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Secret::new(SaltBytes(bytes))
    })
}

/// Replaces a span with a stable short token derived from the original
/// text and the process-wide salt.
///
/// Repeated occurrences of the same value collapse to the same token, so
/// referential identity survives scrubbing (the same plaintiff name maps
/// to one token throughout a document) without revealing the value.
pub struct HashTokenStrategy;

impl HashTokenStrategy {
    /// Create a new hash token strategy.
    pub fn new() -> Self {
        Self
    }

    fn token_for(value: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(process_salt().expose_secret().0);
        hasher.update(value.as_bytes());
        let digest = hasher.finalize();
        let encoded = URL_SAFE_NO_PAD.encode(digest);
        encoded[..TOKEN_LEN].to_string()
    }
}

impl AnonymizerStrategy for HashTokenStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::HashToken
    }

    fn replacement(&self, span: &EntitySpan) -> String {
        format!("{}_{}", span.entity_type.label(), Self::token_for(&span.text))
    }
}

impl Default for HashTokenStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrub::model::{EntityType, RecognizerSource};

    fn span(entity_type: EntityType, text: &str) -> EntitySpan {
        EntitySpan::new(
            entity_type,
            0,
            text.len(),
            text,
            0.9,
            RecognizerSource::Pattern("test".into()),
        )
        .unwrap()
    }

    #[test]
    fn test_same_value_same_token() {
        let strategy = HashTokenStrategy::new();
        let a = strategy.replacement(&span(EntityType::Person, "Jennifer Martinez"));
        let b = strategy.replacement(&span(EntityType::Person, "Jennifer Martinez"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_values_different_tokens() {
        let strategy = HashTokenStrategy::new();
        let a = strategy.replacement(&span(EntityType::Person, "Jennifer Martinez"));
        let b = strategy.replacement(&span(EntityType::Person, "John Smith"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_token_shape() {
        let strategy = HashTokenStrategy::new();
        let token = strategy.replacement(&span(EntityType::EmailAddress, "a@b.com"));
        assert!(token.starts_with("EMAIL_ADDRESS_"));
        assert_eq!(token.len(), "EMAIL_ADDRESS_".len() + TOKEN_LEN);
        // Token must not reveal the value.
        assert!(!token.contains("a@b.com"));
    }
}
