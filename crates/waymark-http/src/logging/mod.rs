pub mod config;
pub mod structured;

pub use config::{init_logging, LoggingConfig};
