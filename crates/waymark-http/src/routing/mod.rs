//! Convention-based request routing
//!
//! A request path is matched against registered handler and action names
//! instead of a route table. The pipeline runs in this order:
//!
//! 1. [`segments`] splits the path into segments
//! 2. [`locator`] finds the longest segment prefix that names a handler
//! 3. [`resolver`] finds the longest remaining prefix that names an action
//! 4. [`validator`] checks the leftover parameters against declared patterns
//! 5. [`dispatcher`] decodes the parameters and invokes the action

pub mod dispatcher;
pub mod locator;
pub mod naming;
pub mod resolver;
pub mod segments;
pub mod validator;

pub use dispatcher::{Dispatcher, ResolvedRoute};
pub use locator::{HandlerDescriptor, HandlerLocator};
pub use naming::normalize;
pub use resolver::ActionResolver;
pub use segments::{tokenize, ParameterList, PathSegments};
pub use validator::ParameterValidator;
