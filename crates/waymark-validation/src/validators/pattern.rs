//! Pattern-based validators using regular expressions

use crate::error::{PatternError, ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use regex::Regex;
use serde_json::Value;

/// Validator for custom regular expression patterns
#[derive(Debug, Clone)]
pub struct PatternValidator {
    /// The regular expression pattern
    pattern: Regex,
    /// The declaration the validator was built from
    source: String,
    /// Whether to match the entire string or just find a match
    pub full_match: bool,
}

impl PatternValidator {
    /// Create a validator that must match the whole value
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        Ok(Self::from_regex(Regex::new(pattern)?))
    }

    /// Create a validator from an existing Regex
    pub fn from_regex(regex: Regex) -> Self {
        Self {
            source: regex.as_str().to_string(),
            pattern: regex,
            full_match: true,
        }
    }

    /// Build a validator from a parameter declaration
    ///
    /// `/body/flags` is unwrapped and the flags (`i`, `m`, `s`, `x`; `u` is
    /// accepted and ignored) become inline flags. A declaration that does not
    /// start with `/` is taken as the body itself. Declared patterns search the
    /// value, so anchoring is up to the pattern.
    pub fn from_delimited(declaration: &str) -> Result<Self, PatternError> {
        let declaration = declaration.trim();
        if declaration.is_empty() {
            return Err(PatternError::Empty);
        }

        let (body, flags) = split_delimited(declaration)?;

        let mut inline = String::new();
        for flag in flags.chars() {
            match flag {
                'i' | 'm' | 's' | 'x' => {
                    if !inline.contains(flag) {
                        inline.push(flag);
                    }
                }
                'u' => {}
                other => return Err(PatternError::UnsupportedFlag(other)),
            }
        }

        let expression = if inline.is_empty() {
            body.to_string()
        } else {
            format!("(?{}){}", inline, body)
        };

        let mut validator = Self::from_regex(Regex::new(&expression)?);
        validator.source = declaration.to_string();
        validator.full_match = false;
        Ok(validator)
    }

    /// Get the compiled pattern string
    pub fn pattern_string(&self) -> &str {
        self.pattern.as_str()
    }

    /// Get the declaration this validator was built from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Test a value against the pattern
    pub fn matches(&self, text: &str) -> bool {
        if self.full_match {
            self.pattern
                .find(text)
                .map_or(false, |m| m.start() == 0 && m.end() == text.len())
        } else {
            self.pattern.is_match(text)
        }
    }
}

fn split_delimited(declaration: &str) -> Result<(&str, &str), PatternError> {
    let Some(rest) = declaration.strip_prefix('/') else {
        return Ok((declaration, ""));
    };

    match rest.rfind('/') {
        Some(end) => Ok((&rest[..end], &rest[end + 1..])),
        None => Err(PatternError::UnterminatedDelimiter(declaration.to_string())),
    }
}

impl ValidationRule for PatternValidator {
    fn validate(&self, value: &str, field: &str) -> ValidationResult<()> {
        if !self.matches(value) {
            let message = format!("{} does not match the pattern {}", field, self.source);

            return Err(ValidationError::with_code(field, message, "pattern_mismatch").into());
        }

        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "pattern"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        params.insert("pattern".to_string(), Value::String(self.source.clone()));
        params.insert("full_match".to_string(), Value::Bool(self.full_match));

        Some(Value::Object(params))
    }
}
