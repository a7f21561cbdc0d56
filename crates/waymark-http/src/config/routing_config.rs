//! Routing configuration
//!
//! Controls how request paths are turned into handler and action names:
//! the handler namespace and suffix, the verb prefix overrides, the
//! catch-all and index names, and whether parameter validation runs.

use super::defaults::RoutingDefaults;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use waymark_core::{AppConfigTrait, ConfigError, ConfigRepository, ConfigSource};

/// Repository section holding the routing keys
pub const ROUTING_SECTION: &str = "http.routing";

/// Repository key of the parameter validation flag
pub const PARAMETER_VALIDATION_KEY: &str = "http.parameterValidation";

/// Convention settings for the dispatcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Lowercased HTTP verb to action-name prefix, e.g. `put -> update`
    pub prefix_map: HashMap<String, String>,
    /// Check parameters against the patterns declared on the action
    pub parameter_validation: bool,
    /// Prepended to the normalized path identifier to form a handler name
    pub namespace: String,
    /// Appended to the normalized path identifier to form a handler name
    pub handler_suffix: String,
    /// Identifier of the handler used when no path prefix matches
    pub fallback_handler: String,
    /// Action-name prefix accepted for every verb
    pub catch_all_prefix: String,
    /// Action suffix tried when no path prefix names an action
    pub index_action: String,
    /// Percent-decoding passes applied to each final parameter
    pub decode_passes: u8,
    /// Stop the name search at the first segment that is not purely alphabetic
    pub alphabetic_segments_only: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            prefix_map: HashMap::new(),
            parameter_validation: RoutingDefaults::PARAMETER_VALIDATION,
            namespace: RoutingDefaults::NAMESPACE.to_string(),
            handler_suffix: RoutingDefaults::HANDLER_SUFFIX.to_string(),
            fallback_handler: RoutingDefaults::FALLBACK_HANDLER.to_string(),
            catch_all_prefix: RoutingDefaults::CATCH_ALL_PREFIX.to_string(),
            index_action: RoutingDefaults::INDEX_ACTION.to_string(),
            decode_passes: RoutingDefaults::DECODE_PASSES,
            alphabetic_segments_only: RoutingDefaults::ALPHABETIC_SEGMENTS_ONLY,
        }
    }
}

impl RoutingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a verb to a custom action prefix
    pub fn with_prefix(mut self, verb: &str, prefix: &str) -> Self {
        self.prefix_map
            .insert(verb.to_ascii_lowercase(), prefix.to_ascii_lowercase());
        self
    }

    pub fn with_parameter_validation(mut self, enabled: bool) -> Self {
        self.parameter_validation = enabled;
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_handler_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.handler_suffix = suffix.into();
        self
    }

    pub fn with_fallback_handler(mut self, identifier: impl Into<String>) -> Self {
        self.fallback_handler = identifier.into();
        self
    }

    pub fn with_decode_passes(mut self, passes: u8) -> Self {
        self.decode_passes = passes;
        self
    }

    pub fn with_alphabetic_segments_only(mut self, enabled: bool) -> Self {
        self.alphabetic_segments_only = enabled;
        self
    }

    /// Fully-qualified handler name for a normalized identifier
    pub fn handler_name(&self, identifier: &str) -> String {
        format!("{}{}{}", self.namespace, identifier, self.handler_suffix)
    }

    /// Fully-qualified name of the fallback handler
    pub fn fallback_handler_name(&self) -> String {
        self.handler_name(&self.fallback_handler)
    }

    /// Action prefix for an HTTP method
    ///
    /// The method is lowercased and looked up in the prefix map; without an
    /// override the lowercased method is the prefix.
    pub fn prefix_for(&self, method: &str) -> String {
        verb_prefix(method, &self.prefix_map)
    }

    /// Read the `http.routing.*` keys and `http.parameterValidation`
    ///
    /// Missing keys keep their defaults; present keys of the wrong type are
    /// reported as errors.
    pub fn from_repository(config: &ConfigRepository) -> Result<Self, ConfigError> {
        let section = config.section(ROUTING_SECTION);
        let mut routing = Self::default();

        if let Some(map) = section.try_get::<HashMap<String, String>>("prefixMap")? {
            routing.prefix_map = map
                .into_iter()
                .map(|(verb, prefix)| (verb.to_ascii_lowercase(), prefix.to_ascii_lowercase()))
                .collect();
        }
        if let Some(enabled) = config.try_get(PARAMETER_VALIDATION_KEY)? {
            routing.parameter_validation = enabled;
        }
        if let Some(namespace) = section.try_get("namespace")? {
            routing.namespace = namespace;
        }
        if let Some(suffix) = section.try_get("handlerSuffix")? {
            routing.handler_suffix = suffix;
        }
        if let Some(fallback) = section.try_get("fallbackHandler")? {
            routing.fallback_handler = fallback;
        }
        if let Some(prefix) = section.try_get("catchAllPrefix")? {
            routing.catch_all_prefix = prefix;
        }
        if let Some(index) = section.try_get("indexAction")? {
            routing.index_action = index;
        }
        if let Some(passes) = section.try_get("decodePasses")? {
            routing.decode_passes = passes;
        }
        if let Some(enabled) = section.try_get("alphabeticSegmentsOnly")? {
            routing.alphabetic_segments_only = enabled;
        }

        Ok(routing)
    }
}

/// Resolve the action prefix for a method against a prefix map
pub fn verb_prefix(method: &str, prefix_map: &HashMap<String, String>) -> String {
    let verb = method.to_ascii_lowercase();
    match prefix_map.get(&verb) {
        Some(prefix) => prefix.to_ascii_lowercase(),
        None => verb,
    }
}

/// Parse `put=update,delete=remove` into a prefix map
pub fn parse_prefix_map(value: &str) -> Result<HashMap<String, String>, ConfigError> {
    let mut map = HashMap::new();
    for entry in value.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (verb, prefix) = entry.split_once('=').ok_or_else(|| {
            ConfigError::invalid_value("prefix_map", entry, "verb=prefix pairs separated by commas")
        })?;
        map.insert(
            verb.trim().to_ascii_lowercase(),
            prefix.trim().to_ascii_lowercase(),
        );
    }
    Ok(map)
}

fn is_identifier(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl AppConfigTrait for RoutingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(map) = env::var("ROUTING_PREFIX_MAP") {
            config.prefix_map = parse_prefix_map(&map)?;
        }

        if let Ok(value) = env::var("ROUTING_PARAMETER_VALIDATION") {
            config.parameter_validation =
                value.parse().map_err(|_| ConfigError::InvalidValue {
                    field: "parameter_validation".to_string(),
                    value,
                    expected: "true or false".to_string(),
                })?;
        }

        if let Ok(namespace) = env::var("ROUTING_NAMESPACE") {
            config.namespace = namespace;
        }

        if let Ok(suffix) = env::var("ROUTING_HANDLER_SUFFIX") {
            config.handler_suffix = suffix;
        }

        if let Ok(fallback) = env::var("ROUTING_FALLBACK_HANDLER") {
            config.fallback_handler = fallback;
        }

        if let Ok(prefix) = env::var("ROUTING_CATCH_ALL_PREFIX") {
            config.catch_all_prefix = prefix;
        }

        if let Ok(index) = env::var("ROUTING_INDEX_ACTION") {
            config.index_action = index;
        }

        if let Ok(value) = env::var("ROUTING_DECODE_PASSES") {
            config.decode_passes = value.parse().map_err(|_| ConfigError::InvalidValue {
                field: "decode_passes".to_string(),
                value,
                expected: "a small non-negative number".to_string(),
            })?;
        }

        if let Ok(value) = env::var("ROUTING_ALPHABETIC_SEGMENTS_ONLY") {
            config.alphabetic_segments_only =
                value.parse().map_err(|_| ConfigError::InvalidValue {
                    field: "alphabetic_segments_only".to_string(),
                    value,
                    expected: "true or false".to_string(),
                })?;
        }

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !is_identifier(&self.catch_all_prefix) {
            return Err(ConfigError::validation_failed(
                "Catch-all prefix must be a non-empty identifier",
            ));
        }

        if !is_identifier(&self.index_action) {
            return Err(ConfigError::validation_failed(
                "Index action must be a non-empty identifier",
            ));
        }

        if self.fallback_handler.is_empty() {
            return Err(ConfigError::validation_failed(
                "Fallback handler identifier must not be empty",
            ));
        }

        if self.namespace.is_empty() && self.handler_suffix.is_empty() {
            return Err(ConfigError::validation_failed(
                "Namespace and handler suffix cannot both be empty",
            ));
        }

        if self.decode_passes > RoutingDefaults::MAX_DECODE_PASSES {
            return Err(ConfigError::invalid_value(
                "decode_passes",
                self.decode_passes.to_string(),
                format!("at most {}", RoutingDefaults::MAX_DECODE_PASSES),
            ));
        }

        for (verb, prefix) in &self.prefix_map {
            if verb.is_empty() || !is_identifier(prefix) {
                return Err(ConfigError::invalid_value(
                    format!("prefix_map.{}", verb),
                    prefix.clone(),
                    "a non-empty identifier",
                ));
            }
        }

        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        let mut sources = HashMap::new();
        sources.insert(
            "prefix_map".to_string(),
            ConfigSource::EnvVar("ROUTING_PREFIX_MAP".to_string()),
        );
        sources.insert(
            "parameter_validation".to_string(),
            ConfigSource::EnvVar("ROUTING_PARAMETER_VALIDATION".to_string()),
        );
        sources.insert(
            "namespace".to_string(),
            ConfigSource::EnvVar("ROUTING_NAMESPACE".to_string()),
        );
        sources.insert(
            "handler_suffix".to_string(),
            ConfigSource::EnvVar("ROUTING_HANDLER_SUFFIX".to_string()),
        );
        sources.insert(
            "fallback_handler".to_string(),
            ConfigSource::EnvVar("ROUTING_FALLBACK_HANDLER".to_string()),
        );
        sources.insert(
            "catch_all_prefix".to_string(),
            ConfigSource::EnvVar("ROUTING_CATCH_ALL_PREFIX".to_string()),
        );
        sources.insert(
            "index_action".to_string(),
            ConfigSource::EnvVar("ROUTING_INDEX_ACTION".to_string()),
        );
        sources.insert(
            "decode_passes".to_string(),
            ConfigSource::EnvVar("ROUTING_DECODE_PASSES".to_string()),
        );
        sources.insert(
            "alphabetic_segments_only".to_string(),
            ConfigSource::EnvVar("ROUTING_ALPHABETIC_SEGMENTS_ONLY".to_string()),
        );
        sources
    }
}
