//! Parameter validation against declared patterns

use crate::config::RoutingConfig;
use crate::controller::ActionDescriptor;
use crate::routing::segments::ParameterList;
use waymark_validation::{ValidationErrors, ValidationResult, ValidationRule};

#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterValidator {
    enabled: bool,
}

impl ParameterValidator {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn from_config(config: &RoutingConfig) -> Self {
        Self::new(config.parameter_validation)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Check every rule, collecting all failures in parameter order
    ///
    /// Rules without a pattern, and rules for optional parameters that were
    /// not supplied, are skipped. Always succeeds when disabled.
    pub fn check(&self, action: &ActionDescriptor, parameters: &ParameterList) -> ValidationResult<()> {
        if !self.enabled {
            return Ok(());
        }

        let mut errors = ValidationErrors::new();
        for rule in &action.rules {
            let (Some(pattern), Some(value)) = (rule.pattern.as_ref(), parameters.get(rule.index))
            else {
                continue;
            };

            if let Err(failures) = pattern.validate(value, &rule.name) {
                tracing::debug!(
                    target: "waymark::routing",
                    "Parameter ${} of {} rejected by {}",
                    rule.name,
                    action.name,
                    pattern.source()
                );
                errors.merge(failures);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn validate(&self, action: &ActionDescriptor, parameters: &ParameterList) -> bool {
        self.check(action, parameters).is_ok()
    }
}
