//! # waymark-validation
//!
//! Pattern validation for path parameters. Patterns may be written bare
//! (`^[0-9]+$`) or wrapped in slash delimiters with trailing flags
//! (`/^[a-z]+$/i`), the form used by action parameter declarations.

pub mod error;
pub mod traits;
pub mod validators;

// Re-exports for easy access
pub use error::{PatternError, ValidationError, ValidationErrors, ValidationResult};
pub use traits::ValidationRule;

// Built-in validators
pub use validators::pattern::PatternValidator;
