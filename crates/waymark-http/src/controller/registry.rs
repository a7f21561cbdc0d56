//! Controller registry
//!
//! Handlers are discovered by name at request time, so every controller has to
//! be registered up front under its fully-qualified name together with its
//! action metadata and a factory. The dispatcher only sees the registry through
//! three narrow traits:
//!
//! - [`HandlerRegistry`]: does a handler with this name exist?
//! - [`ActionIntrospector`]: what does this action accept?
//! - [`HandlerFactory`]: give me an instance to call.
//!
//! [`ControllerRegistry`] implements all three.
//!
//! ```rust,ignore
//! let registry = ControllerRegistry::new();
//! registry.register::<UserController>()?;
//! assert!(registry.exists("app::controllers::UserController"));
//! ```

use crate::controller::action::{ActionDescriptor, ActionSignature};
use crate::controller::base::{Controller, ControllerType};
use crate::errors::{HttpError, HttpResult};
use dashmap::DashMap;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Existence checks for handler names
pub trait HandlerRegistry: Send + Sync {
    fn exists(&self, handler: &str) -> bool;
}

/// Action metadata lookup
pub trait ActionIntrospector: Send + Sync {
    /// `None` when the handler has no action with exactly this name
    fn describe(&self, handler: &str, action: &str) -> Option<Arc<ActionDescriptor>>;
}

/// Handler construction
pub trait HandlerFactory: Send + Sync {
    fn instantiate(&self, handler: &str) -> HttpResult<Arc<dyn Controller>>;
}

type ControllerFactory = Arc<dyn Fn() -> HttpResult<Arc<dyn Controller>> + Send + Sync>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Controller '{0}' is already registered")]
    AlreadyRegistered(String),

    #[error("Controller '{controller}' declares action '{action}' more than once")]
    DuplicateAction { controller: String, action: String },
}

struct ControllerEntry {
    actions: HashMap<String, Arc<ActionDescriptor>>,
    factory: ControllerFactory,
}

/// Thread-safe registry of controllers keyed by fully-qualified name
#[derive(Clone, Default)]
pub struct ControllerRegistry {
    controllers: Arc<DashMap<String, ControllerEntry>>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a controller type under its `NAME`
    pub fn register<T: ControllerType>(&self) -> Result<(), RegistryError> {
        self.register_with(T::NAME, T::actions(), || {
            T::create().map(|controller| Arc::new(controller) as Arc<dyn Controller>)
        })
    }

    /// Register a controller under an explicit name with a custom factory
    pub fn register_with<F>(
        &self,
        name: &str,
        signatures: Vec<ActionSignature>,
        factory: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn() -> HttpResult<Arc<dyn Controller>> + Send + Sync + 'static,
    {
        let mut actions = HashMap::with_capacity(signatures.len());
        for signature in &signatures {
            let descriptor = ActionDescriptor::from_signature(signature);
            if actions
                .insert(descriptor.name.clone(), Arc::new(descriptor))
                .is_some()
            {
                return Err(RegistryError::DuplicateAction {
                    controller: name.to_string(),
                    action: signature.name().to_string(),
                });
            }
        }

        match self.controllers.entry(name.to_string()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                Err(RegistryError::AlreadyRegistered(name.to_string()))
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(ControllerEntry {
                    actions,
                    factory: Arc::new(factory),
                });
                tracing::debug!(
                    target: "waymark::routing",
                    "Registered controller {} with {} action(s)",
                    name,
                    signatures.len()
                );
                Ok(())
            }
        }
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.controllers.contains_key(name)
    }

    /// Registered controller names, sorted
    pub fn registered_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.controllers.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Action names of one controller, sorted
    pub fn action_names(&self, name: &str) -> Vec<String> {
        let mut actions: Vec<String> = self
            .controllers
            .get(name)
            .map(|entry| entry.actions.keys().cloned().collect())
            .unwrap_or_default();
        actions.sort();
        actions
    }

    pub fn count(&self) -> usize {
        self.controllers.len()
    }
}

impl HandlerRegistry for ControllerRegistry {
    fn exists(&self, handler: &str) -> bool {
        self.is_registered(handler)
    }
}

impl ActionIntrospector for ControllerRegistry {
    fn describe(&self, handler: &str, action: &str) -> Option<Arc<ActionDescriptor>> {
        self.controllers.get(handler)?.actions.get(action).cloned()
    }
}

impl HandlerFactory for ControllerRegistry {
    fn instantiate(&self, handler: &str) -> HttpResult<Arc<dyn Controller>> {
        // Release the shard guard before running user code.
        let factory = self
            .controllers
            .get(handler)
            .map(|entry| Arc::clone(&entry.factory))
            .ok_or_else(|| HttpError::service_resolution(handler))?;

        factory()
    }
}

impl fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerRegistry")
            .field("controllers", &self.registered_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ResourceResponse;
    use async_trait::async_trait;

    struct PingController;

    #[async_trait]
    impl Controller for PingController {
        async fn call(
            self: Arc<Self>,
            action: String,
            _params: Vec<String>,
        ) -> HttpResult<ResourceResponse> {
            Ok(ResourceResponse::text(action))
        }
    }

    impl ControllerType for PingController {
        const NAME: &'static str = "app::controllers::PingController";

        fn actions() -> Vec<ActionSignature> {
            vec![
                ActionSignature::new("allIndex"),
                ActionSignature::new("getPing").required("target"),
            ]
        }

        fn create() -> HttpResult<Self> {
            Ok(PingController)
        }
    }

    #[test]
    fn test_register_and_describe() {
        let registry = ControllerRegistry::new();
        registry.register::<PingController>().unwrap();

        assert!(registry.exists("app::controllers::PingController"));
        assert!(!registry.exists("app::controllers::PongController"));
        assert_eq!(registry.count(), 1);
        assert_eq!(
            registry.action_names("app::controllers::PingController"),
            vec!["allIndex", "getPing"]
        );

        let descriptor = registry
            .describe("app::controllers::PingController", "getPing")
            .unwrap();
        assert_eq!(descriptor.min_params, 1);
        assert!(registry
            .describe("app::controllers::PingController", "getpong")
            .is_none());
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let registry = ControllerRegistry::new();
        registry.register::<PingController>().unwrap();

        assert_eq!(
            registry.register::<PingController>(),
            Err(RegistryError::AlreadyRegistered(
                "app::controllers::PingController".to_string()
            ))
        );
    }

    #[test]
    fn test_duplicate_action_is_rejected() {
        let registry = ControllerRegistry::new();
        let result = registry.register_with(
            "app::controllers::TwiceController",
            vec![ActionSignature::new("allIndex"), ActionSignature::new("allIndex")],
            || Ok(Arc::new(PingController) as Arc<dyn Controller>),
        );

        assert!(matches!(result, Err(RegistryError::DuplicateAction { .. })));
        assert!(!registry.is_registered("app::controllers::TwiceController"));
    }

    #[tokio::test]
    async fn test_instantiate_and_call() {
        let registry = ControllerRegistry::new();
        registry.register::<PingController>().unwrap();

        let controller = registry
            .instantiate("app::controllers::PingController")
            .unwrap();
        let response = controller
            .call("allIndex".to_string(), Vec::new())
            .await
            .unwrap();
        assert_eq!(response.to_string(), "allIndex");

        assert!(matches!(
            registry.instantiate("app::controllers::Missing"),
            Err(HttpError::ServiceResolutionFailed { .. })
        ));
    }
}
