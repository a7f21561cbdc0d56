//! Action metadata
//!
//! Controllers describe each action with an [`ActionSignature`]: its
//! positional parameters, visibility, and any parameter patterns, either
//! declared directly or written as `@param` documentation lines. Signatures
//! are compiled once into an [`ActionDescriptor`] when the controller is
//! registered.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use waymark_validation::PatternValidator;

static PARAM_DOC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@param\s+(?:[^\s$]+\s+)?\$(\w+)(?:\((.+)\))?").expect("valid @param regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

/// One positional parameter of an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionParam {
    pub name: String,
    pub required: bool,
    pub variadic: bool,
    pub pattern: Option<String>,
}

/// Declared shape of an action, as written by the controller author
#[derive(Debug, Clone, Default)]
pub struct ActionSignature {
    name: String,
    visibility: Visibility,
    params: Vec<ActionParam>,
    docs: Vec<String>,
}

impl ActionSignature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    fn param(mut self, name: &str, required: bool, variadic: bool, pattern: Option<&str>) -> Self {
        self.params.push(ActionParam {
            name: name.to_string(),
            required,
            variadic,
            pattern: pattern.map(str::to_string),
        });
        self
    }

    pub fn required(self, name: &str) -> Self {
        self.param(name, true, false, None)
    }

    pub fn optional(self, name: &str) -> Self {
        self.param(name, false, false, None)
    }

    /// Accept any number of trailing parameters
    pub fn variadic(self, name: &str) -> Self {
        self.param(name, false, true, None)
    }

    /// Required parameter with a validation pattern such as `/^[0-9]+$/`
    pub fn validated(self, name: &str, pattern: &str) -> Self {
        self.param(name, true, false, Some(pattern))
    }

    /// Attach a documentation line, e.g. `@param int $id(/^[0-9]+$/)`
    pub fn doc(mut self, line: impl Into<String>) -> Self {
        self.docs.push(line.into());
        self
    }

    pub fn protected(mut self) -> Self {
        self.visibility = Visibility::Protected;
        self
    }

    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[ActionParam] {
        &self.params
    }
}

/// Validation pattern bound to a parameter position
#[derive(Debug, Clone)]
pub struct ParameterRule {
    pub index: usize,
    pub name: String,
    pub pattern: Option<PatternValidator>,
}

/// Compiled description of an action
#[derive(Debug, Clone)]
pub struct ActionDescriptor {
    pub name: String,
    pub visibility: Visibility,
    pub min_params: usize,
    /// `None` when the action takes a variadic tail
    pub max_params: Option<usize>,
    pub param_names: Vec<String>,
    pub rules: Vec<ParameterRule>,
}

impl ActionDescriptor {
    pub fn from_signature(signature: &ActionSignature) -> Self {
        let params = signature.params();
        let min_params = params
            .iter()
            .rposition(|p| p.required)
            .map_or(0, |last| last + 1);
        let max_params = if params.iter().any(|p| p.variadic) {
            None
        } else {
            Some(params.len())
        };

        Self {
            name: signature.name.clone(),
            visibility: signature.visibility,
            min_params,
            max_params,
            param_names: params.iter().map(|p| p.name.clone()).collect(),
            rules: extract_rules(signature),
        }
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn is_variadic(&self) -> bool {
        self.max_params.is_none()
    }

    /// Check whether `count` positional parameters fit the arity bounds
    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min_params && self.max_params.map_or(true, |max| count <= max)
    }

    /// Public and callable with `count` parameters
    pub fn is_invocable_with(&self, count: usize) -> bool {
        self.is_public() && (self.is_variadic() || self.accepts(count))
    }
}

fn compile(action: &str, param: &str, declaration: &str) -> Option<PatternValidator> {
    match PatternValidator::from_delimited(declaration) {
        Ok(validator) => Some(validator),
        Err(err) => {
            tracing::warn!(
                target: "waymark::routing",
                "Skipping pattern for {}::${}: {}",
                action,
                param,
                err
            );
            None
        }
    }
}

fn extract_rules(signature: &ActionSignature) -> Vec<ParameterRule> {
    let position = |name: &str| signature.params.iter().position(|p| p.name == name);
    let mut rules = BTreeMap::new();

    for line in &signature.docs {
        let Some(captures) = PARAM_DOC.captures(line) else {
            continue;
        };
        let name = &captures[1];
        let (Some(index), Some(declaration)) = (position(name), captures.get(2)) else {
            continue;
        };
        if let Some(pattern) = compile(&signature.name, name, declaration.as_str()) {
            rules.insert(
                index,
                ParameterRule {
                    index,
                    name: name.to_string(),
                    pattern: Some(pattern),
                },
            );
        }
    }

    for (index, param) in signature.params.iter().enumerate() {
        let Some(declaration) = param.pattern.as_deref() else {
            continue;
        };
        if let Some(pattern) = compile(&signature.name, &param.name, declaration) {
            rules.insert(
                index,
                ParameterRule {
                    index,
                    name: param.name.clone(),
                    pattern: Some(pattern),
                },
            );
        }
    }

    rules.into_values().collect()
}
