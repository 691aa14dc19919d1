//! Domain error types
//!
//! Error hierarchy for ledact. All errors are domain-specific and don't
//! expose third-party types.

use thiserror::Error;

/// Main ledact error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum LedactError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Policy construction/validation errors
    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    /// Recognizer construction or scan errors
    #[error("Recognizer error: {0}")]
    Recognizer(#[from] RecognizerError),

    /// No recognizer at all could be constructed, including the minimal
    /// fallback set. The engine fails closed rather than passing text
    /// through unscrubbed.
    #[error("No recognizers available: refusing to return unscrubbed text")]
    NoRecognizers,

    /// Audit logging errors
    #[error("Audit error: {0}")]
    Audit(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Policy configuration errors
///
/// All of these are rejected at `Policy` construction, never surfaced at
/// scrub time.
#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    /// An entity-type string that the engine does not know
    #[error("Unknown entity type: {0}")]
    UnknownEntityType(String),

    /// The same entity type listed twice in one direction's set
    #[error("Duplicate entity type {entity} in {field}")]
    DuplicateEntityType {
        entity: String,
        field: &'static str,
    },

    /// A confidence threshold outside [0.0, 1.0]
    #[error("Confidence threshold {0} outside [0.0, 1.0]")]
    ThresholdOutOfRange(f64),

    /// An unknown anonymization strategy name
    #[error("Unknown anonymization strategy: {0}")]
    UnknownStrategy(String),

    /// A policy document key the engine does not recognize
    #[error("Unknown policy field: {0}")]
    UnknownField(String),

    /// The policy document has the wrong shape (not a map, wrong value types)
    #[error("Malformed policy document: {0}")]
    Malformed(String),
}

/// Recognizer-layer errors
#[derive(Debug, Error)]
pub enum RecognizerError {
    /// Zero-length or inverted span offsets
    #[error("Invalid span bounds: start {start} >= end {end}")]
    InvalidSpan { start: usize, end: usize },

    /// Pattern library failed to load or compile
    #[error("Pattern library error: {0}")]
    PatternLibrary(String),

    /// The optional deep backend could not be loaded
    #[error("Deep backend unavailable: {0}")]
    BackendUnavailable(String),

    /// A backend inference call failed
    #[error("Backend inference failed: {0}")]
    Inference(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for LedactError {
    fn from(err: std::io::Error) -> Self {
        LedactError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for LedactError {
    fn from(err: serde_json::Error) -> Self {
        LedactError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for LedactError {
    fn from(err: toml::de::Error) -> Self {
        LedactError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledact_error_display() {
        let err = LedactError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_policy_error_conversion() {
        let policy_err = PolicyError::UnknownEntityType("WIDGET".to_string());
        let err: LedactError = policy_err.into();
        assert!(matches!(err, LedactError::Policy(_)));
    }

    #[test]
    fn test_recognizer_error_conversion() {
        let rec_err = RecognizerError::BackendUnavailable("lexicon missing".to_string());
        let err: LedactError = rec_err.into();
        assert!(matches!(err, LedactError::Recognizer(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: LedactError = io_err.into();
        assert!(matches!(err, LedactError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: LedactError = toml_err.into();
        assert!(matches!(err, LedactError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_no_recognizers_fails_closed_message() {
        let err = LedactError::NoRecognizers;
        assert!(err.to_string().contains("unscrubbed"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let _: &dyn std::error::Error = &LedactError::NoRecognizers;
        let _: &dyn std::error::Error = &PolicyError::ThresholdOutOfRange(1.5);
        let _: &dyn std::error::Error = &RecognizerError::InvalidSpan { start: 3, end: 3 };
    }
}
