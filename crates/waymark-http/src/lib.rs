//! # waymark-http
//!
//! Convention-based request dispatch: handlers and actions are found from
//! the request path and method alone, with no route table.
//!
//! `GET /user/profile/42` tries `UserProfile42Controller`,
//! `UserProfileController`, then `UserController`. On the first handler that
//! exists the leftover segments are matched against action names the same
//! way (`getProfile42`, `getProfile`, then the `all*` catch-all forms), and
//! whatever is left over becomes the positional parameters.
//!
//! ```rust,ignore
//! let registry = Arc::new(ControllerRegistry::new());
//! registry.register::<UserController>()?;
//!
//! let dispatcher = Dispatcher::new(registry, RoutingConfig::default());
//! Kernel::new(dispatcher).serve(addr).await?;
//! ```

pub mod config;
pub mod controller;
pub mod errors;
pub mod kernel;
pub mod logging;
pub mod request;
pub mod response;
pub mod routing;

pub use config::{RoutingConfig, RoutingDefaults};
pub use controller::{
    ActionDescriptor, ActionIntrospector, ActionSignature, Controller, ControllerRegistry,
    ControllerType, HandlerFactory, HandlerRegistry, ParameterRule, RegistryError, Visibility,
};
pub use errors::{DispatchError, DispatchResult, HttpError, HttpResult};
pub use kernel::{Kernel, KernelResponse};
pub use logging::{init_logging, LoggingConfig};
pub use request::DispatchRequest;
pub use response::{ResourceBody, ResourceResponse};
pub use routing::{
    normalize, tokenize, ActionResolver, Dispatcher, HandlerDescriptor, HandlerLocator,
    ParameterList, ParameterValidator, PathSegments, ResolvedRoute,
};

pub use waymark_core::{AppConfigTrait, ConfigRepository};
