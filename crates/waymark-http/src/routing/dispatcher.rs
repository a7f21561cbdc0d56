//! Request dispatch
//!
//! Ties the pipeline together for one request:
//! tokenize, locate the handler, resolve the action, validate (when enabled),
//! decode the parameters, then instantiate the handler and invoke the action.
//! A failing stage ends the request; there are no retries.

use crate::config::RoutingConfig;
use crate::controller::{
    ActionDescriptor, ActionIntrospector, ControllerRegistry, HandlerFactory, HandlerRegistry,
};
use crate::errors::{DispatchError, DispatchResult};
use crate::request::DispatchRequest;
use crate::response::ResourceResponse;
use crate::routing::locator::{HandlerDescriptor, HandlerLocator};
use crate::routing::resolver::ActionResolver;
use crate::routing::segments::tokenize;
use crate::routing::validator::ParameterValidator;
use std::sync::Arc;

/// Outcome of routing a request, before invocation
#[derive(Debug, Clone)]
pub struct ResolvedRoute {
    pub handler: HandlerDescriptor,
    pub action: Arc<ActionDescriptor>,
    /// Decoded parameters in path order
    pub parameters: Vec<String>,
}

pub struct Dispatcher {
    locator: HandlerLocator,
    resolver: ActionResolver,
    validator: ParameterValidator,
    factory: Arc<dyn HandlerFactory>,
    config: Arc<RoutingConfig>,
}

impl Dispatcher {
    /// Dispatch against a controller registry
    pub fn new(registry: Arc<ControllerRegistry>, config: RoutingConfig) -> Self {
        Self::with_collaborators(registry.clone(), registry.clone(), registry, config)
    }

    /// Dispatch against separate lookup, introspection and construction collaborators
    pub fn with_collaborators(
        registry: Arc<dyn HandlerRegistry>,
        introspector: Arc<dyn ActionIntrospector>,
        factory: Arc<dyn HandlerFactory>,
        config: RoutingConfig,
    ) -> Self {
        let config = Arc::new(config);
        Self {
            locator: HandlerLocator::new(registry, config.clone()),
            resolver: ActionResolver::new(introspector, config.clone()),
            validator: ParameterValidator::from_config(&config),
            factory,
            config,
        }
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Resolve a request to a handler, action and decoded parameters
    pub fn resolve(&self, request: &DispatchRequest) -> DispatchResult<ResolvedRoute> {
        let segments = tokenize(request.path());
        let (handler, residual) = self.locator.locate(&segments)?;
        let (action, parameters) = self.resolver.resolve(
            &handler,
            residual,
            request.method().as_str(),
            &self.config.prefix_map,
        )?;

        if let Err(errors) = self.validator.check(&action, &parameters) {
            return Err(DispatchError::invalid_user_input(errors.to_string()));
        }

        let parameters = parameters
            .iter()
            .map(|parameter| self.decode(parameter))
            .collect::<DispatchResult<Vec<_>>>()?;

        Ok(ResolvedRoute {
            handler,
            action,
            parameters,
        })
    }

    /// Resolve a request and invoke the selected action
    ///
    /// The action's result is returned as-is; handler errors come back as
    /// [`DispatchError::Controller`].
    pub async fn route(&self, request: &DispatchRequest) -> DispatchResult<ResourceResponse> {
        let ResolvedRoute {
            handler,
            action,
            parameters,
        } = self.resolve(request)?;

        let controller = self.factory.instantiate(&handler.name)?;
        tracing::debug!(
            target: "waymark::routing",
            "Invoking {}::{} with {} parameter(s)",
            handler.name,
            action.name,
            parameters.len()
        );

        Ok(controller.call(action.name.clone(), parameters).await?)
    }

    fn decode(&self, parameter: &str) -> DispatchResult<String> {
        let mut value = parameter.to_string();
        for _ in 0..self.config.decode_passes {
            value = urlencoding::decode(&value)
                .map_err(|_| {
                    DispatchError::invalid_user_input(format!(
                        "Parameter '{}' is not valid UTF-8 once decoded",
                        parameter
                    ))
                })?
                .into_owned();
        }
        Ok(value)
    }
}
