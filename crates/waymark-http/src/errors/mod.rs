pub mod dispatch_error;
pub mod http_error;

pub use dispatch_error::*;
pub use http_error::*;
