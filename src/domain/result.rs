//! Result type alias for ledact

use super::errors::LedactError;

/// Result type alias for ledact operations
///
/// Convenience alias using `LedactError` as the error type. Use this
/// throughout the codebase for fallible operations.
pub type Result<T> = std::result::Result<T, LedactError>;
