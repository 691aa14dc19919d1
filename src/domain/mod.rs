//! Domain types for ledact
//!
//! The domain layer provides the error taxonomy and the crate-wide
//! [`Result`] alias. The engine's data model (entity types, spans,
//! policies) lives in [`crate::scrub`], next to the pipeline that produces
//! and consumes it.
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, LedactError>`]:
//!
//! ```rust
//! use ledact::domain::{LedactError, Result};
//!
//! fn example() -> Result<()> {
//!     // Errors are automatically converted using the ? operator
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{LedactError, PolicyError, RecognizerError};
pub use result::Result;
