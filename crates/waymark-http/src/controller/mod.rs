pub mod action;
pub mod base;
pub mod registry;

pub use action::{ActionDescriptor, ActionParam, ActionSignature, ParameterRule, Visibility};
pub use base::{Controller, ControllerType};
pub use registry::{
    ActionIntrospector, ControllerRegistry, HandlerFactory, HandlerRegistry, RegistryError,
};
