pub mod resource;

pub use resource::{ResourceBody, ResourceResponse};
