//! Logging setup
//!
//! Wraps `tracing-subscriber` with a small set of presets. Routing decisions
//! are emitted under `waymark::routing`, per-request summaries under
//! `waymark::kernel`.

use serde_json::{json, Value};
use std::io;
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "warn")
    pub level: String,
    /// Emit JSON lines instead of text
    pub json_format: bool,
    /// Multi-line pretty output for development
    pub pretty_print: bool,
    /// Include file and line number information
    pub include_location: bool,
    /// Directive string such as "waymark=debug,axum=warn"; overrides `level`
    pub env_filter: Option<String>,
    /// Service name reported when logging starts
    pub service_name: Option<String>,
    /// Extra fields reported when logging starts
    pub global_fields: serde_json::Map<String, Value>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            pretty_print: true,
            include_location: false,
            env_filter: None,
            service_name: None,
            global_fields: serde_json::Map::new(),
        }
    }
}

impl LoggingConfig {
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            json_format: true,
            pretty_print: false,
            include_location: false,
            env_filter: Some("waymark=info,tower=warn,axum=warn".to_string()),
            service_name: None,
            global_fields: {
                let mut fields = serde_json::Map::new();
                fields.insert("env".to_string(), json!("production"));
                fields
            },
        }
    }

    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            json_format: false,
            pretty_print: true,
            include_location: true,
            env_filter: Some("waymark=trace,axum=debug".to_string()),
            service_name: None,
            global_fields: {
                let mut fields = serde_json::Map::new();
                fields.insert("env".to_string(), json!("development"));
                fields
            },
        }
    }

    /// Minimal output for test runs
    pub fn test() -> Self {
        Self {
            level: "error".to_string(),
            json_format: false,
            pretty_print: false,
            include_location: false,
            env_filter: Some("waymark=error".to_string()),
            service_name: None,
            global_fields: serde_json::Map::new(),
        }
    }

    pub fn with_service(mut self, name: &str) -> Self {
        self.service_name = Some(name.to_string());
        self
    }

    pub fn with_env_filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    pub fn with_global_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.global_fields.insert(key.into(), value.into());
        self
    }

    /// The filter directives this configuration installs
    pub fn directives(&self) -> &str {
        self.env_filter.as_deref().unwrap_or(&self.level)
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over the configured directives. Fails if a
/// global subscriber is already set.
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(config.directives()))?;

    let layer = Layer::new()
        .with_writer(io::stdout)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    if config.json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .try_init()?;
    } else if config.pretty_print {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.pretty())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()?;
    }

    let mut startup = json!({
        "event": "logging_initialized",
        "level": config.level,
        "format": if config.json_format { "json" } else { "text" },
    });
    if let Some(name) = &config.service_name {
        startup["service_name"] = json!(name);
    }
    for (key, value) in &config.global_fields {
        startup[key] = value.clone();
    }
    tracing::info!(target: "waymark::logging", "{}", startup);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_presets() {
        let prod = LoggingConfig::production();
        assert!(prod.json_format);
        assert!(!prod.pretty_print);
        assert_eq!(prod.directives(), "waymark=info,tower=warn,axum=warn");
        assert!(prod.global_fields.contains_key("env"));

        let dev = LoggingConfig::development();
        assert!(dev.pretty_print);
        assert!(dev.include_location);

        let test = LoggingConfig::test();
        assert_eq!(test.level, "error");
        assert!(test.global_fields.is_empty());
    }

    #[test]
    fn test_logging_config_builder() {
        let config = LoggingConfig::default()
            .with_service("catalog")
            .with_global_field("region", "eu")
            .with_env_filter("waymark::routing=trace");

        assert_eq!(config.service_name.as_deref(), Some("catalog"));
        assert_eq!(config.global_fields["region"], "eu");
        assert_eq!(config.directives(), "waymark::routing=trace");
    }

    #[test]
    fn test_directives_fall_back_to_level() {
        assert_eq!(LoggingConfig::default().directives(), "info");
    }
}
