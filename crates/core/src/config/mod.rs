pub mod app_config;
pub mod repository;
pub mod sources;
pub mod validation;

pub use app_config::*;
pub use repository::*;
pub use sources::*;
pub use validation::*;
