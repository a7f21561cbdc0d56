//! Core validation traits

use crate::error::ValidationResult;
use serde_json::Value;

/// Validation rule applied to a single textual value
///
/// Path parameters are always strings, so rules see the raw text and the
/// name of the parameter it was bound to.
pub trait ValidationRule: Send + Sync {
    /// Validate a single value
    fn validate(&self, value: &str, field: &str) -> ValidationResult<()>;

    /// Get the validation rule name/type
    fn rule_name(&self) -> &'static str;

    /// Get validation rule parameters/configuration as JSON
    fn parameters(&self) -> Option<Value> {
        None
    }
}
