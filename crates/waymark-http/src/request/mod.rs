pub mod dispatch_request;

pub use dispatch_request::DispatchRequest;
