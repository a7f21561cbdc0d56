//! Controller traits

use crate::controller::action::ActionSignature;
use crate::errors::HttpResult;
use crate::response::ResourceResponse;
use async_trait::async_trait;
use std::sync::Arc;

/// A handler whose actions can be invoked by name
///
/// `params` arrive decoded and in path order; their count always fits the
/// arity declared for `action`.
#[async_trait]
pub trait Controller: Send + Sync {
    async fn call(self: Arc<Self>, action: String, params: Vec<String>)
        -> HttpResult<ResourceResponse>;
}

/// A controller type that can be registered by name
pub trait ControllerType: Controller + Sized + 'static {
    /// Fully-qualified handler name, e.g. `app::controllers::UserController`
    const NAME: &'static str;

    /// Signatures of every action the controller exposes
    fn actions() -> Vec<ActionSignature>;

    /// Build a fresh instance for one request
    fn create() -> HttpResult<Self>;
}
