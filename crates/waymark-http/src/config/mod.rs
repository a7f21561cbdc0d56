pub mod defaults;
pub mod routing_config;

pub use defaults::*;
pub use routing_config::*;
