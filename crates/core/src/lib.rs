//! # waymark-core
//!
//! Configuration foundation shared by the waymark crates: the application
//! configuration trait, configuration errors and source tracking, and the
//! dotted-key configuration repository consulted by the dispatcher.

pub mod config;

pub use config::{AppConfigTrait, ConfigError, ConfigRepository, ConfigSource};
