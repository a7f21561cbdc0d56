//! Fixture controllers shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use waymark_http::{
    ActionSignature, Controller, ControllerRegistry, ControllerType, Dispatcher, HttpError,
    HttpResult, ResourceResponse, RoutingConfig,
};

/// Echoes the invoked action and its parameters, e.g. `allParameters(one,two)`
pub struct TestController;

#[async_trait]
impl Controller for TestController {
    async fn call(self: Arc<Self>, action: String, params: Vec<String>) -> HttpResult<ResourceResponse> {
        match action.as_str() {
            "allBroken" => Err(HttpError::bad_request("broken on purpose")),
            "getJson" => ResourceResponse::json(&serde_json::json!({ "params": params })),
            _ => Ok(ResourceResponse::text(format!("{}({})", action, params.join(",")))),
        }
    }
}

impl ControllerType for TestController {
    const NAME: &'static str = "app::controllers::TestController";

    fn actions() -> Vec<ActionSignature> {
        vec![
            ActionSignature::new("allIndex"),
            ActionSignature::new("allNoParameters"),
            ActionSignature::new("allParameters").required("one").required("two"),
            ActionSignature::new("allParametersValidation")
                .required("number")
                .required("email")
                .doc("@param int $number(/^(0|[1-9][0-9]*)$/) a non-negative number")
                .doc(r"@param string $email(/\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b/i)"),
            ActionSignature::new("getUser").required("id"),
            ActionSignature::new("postUser").required("id"),
            ActionSignature::new("updateUser").required("id"),
            ActionSignature::new("allOptional").required("first").optional("second"),
            ActionSignature::new("allFiles").variadic("parts"),
            ActionSignature::new("allHidden").private(),
            ActionSignature::new("allBroken"),
            ActionSignature::new("getJson").variadic("params"),
        ]
    }

    fn create() -> HttpResult<Self> {
        Ok(TestController)
    }
}

pub struct HomeController;

#[async_trait]
impl Controller for HomeController {
    async fn call(self: Arc<Self>, action: String, params: Vec<String>) -> HttpResult<ResourceResponse> {
        Ok(ResourceResponse::text(format!("home:{}({})", action, params.join(","))))
    }
}

impl ControllerType for HomeController {
    const NAME: &'static str = "app::controllers::HomeController";

    fn actions() -> Vec<ActionSignature> {
        vec![ActionSignature::new("allIndex")]
    }

    fn create() -> HttpResult<Self> {
        Ok(HomeController)
    }
}

pub fn registry() -> Arc<ControllerRegistry> {
    let registry = ControllerRegistry::new();
    registry.register::<TestController>().unwrap();
    registry.register::<HomeController>().unwrap();
    Arc::new(registry)
}

pub fn dispatcher(config: RoutingConfig) -> Dispatcher {
    Dispatcher::new(registry(), config)
}
