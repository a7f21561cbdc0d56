//! End-to-end dispatch through the fixture controllers

mod common;

use axum::http::Method;
use common::{dispatcher, registry, HomeController, TestController};
use std::sync::Arc;
use waymark_http::{
    Controller, ControllerRegistry, ControllerType, DispatchError, DispatchRequest, Dispatcher,
    HandlerFactory, HttpError, HttpResult, RoutingConfig,
};
use waymark_core::ConfigRepository;

async fn body(dispatcher: &Dispatcher, request: DispatchRequest) -> String {
    dispatcher.route(&request).await.unwrap().to_string()
}

#[tokio::test]
async fn test_handler_index_action() {
    let dispatcher = dispatcher(RoutingConfig::default());
    assert_eq!(body(&dispatcher, DispatchRequest::get("/test")).await, "allIndex()");
    assert_eq!(body(&dispatcher, DispatchRequest::get("/test/")).await, "allIndex()");
}

#[tokio::test]
async fn test_parameters_follow_action_name() {
    let dispatcher = dispatcher(RoutingConfig::default());
    assert_eq!(
        body(&dispatcher, DispatchRequest::get("/test/parameters/one/two")).await,
        "allParameters(one,two)"
    );
    assert_eq!(
        body(&dispatcher, DispatchRequest::get("/test/no-parameters")).await,
        "allNoParameters()"
    );
}

#[tokio::test]
async fn test_fallback_handler_without_matching_action() {
    let dispatcher = dispatcher(RoutingConfig::default());
    let error = dispatcher.route(&DispatchRequest::get("/no/method")).await.unwrap_err();
    assert!(matches!(error, DispatchError::MethodNotFound { .. }));
}

#[tokio::test]
async fn test_fallback_handler_for_root() {
    let dispatcher = dispatcher(RoutingConfig::default());
    assert_eq!(body(&dispatcher, DispatchRequest::get("/")).await, "home:allIndex()");
}

#[tokio::test]
async fn test_found_action_with_wrong_arity_is_not_retried() {
    let dispatcher = dispatcher(RoutingConfig::default());
    let error = dispatcher
        .route(&DispatchRequest::get("/test/no/parameters/invalid/parameters"))
        .await
        .unwrap_err();
    assert!(matches!(error, DispatchError::MethodNotFound { .. }));
}

#[tokio::test]
async fn test_parameter_validation() {
    let dispatcher = dispatcher(RoutingConfig::default().with_parameter_validation(true));

    assert_eq!(
        body(
            &dispatcher,
            DispatchRequest::get("/test/parameters/validation/24/martin@solid-framework.com")
        )
        .await,
        "allParametersValidation(24,martin@solid-framework.com)"
    );

    let error = dispatcher
        .route(&DispatchRequest::get(
            "/test/parameters/validation/sk8/martin@solid-framework.com",
        ))
        .await
        .unwrap_err();
    assert!(matches!(error, DispatchError::InvalidUserInput { .. }));
    assert!(error.to_string().starts_with("number"));
}

#[tokio::test]
async fn test_validation_disabled_by_default() {
    let dispatcher = dispatcher(RoutingConfig::default());
    assert_eq!(
        body(
            &dispatcher,
            DispatchRequest::get("/test/parameters/validation/sk8/nobody")
        )
        .await,
        "allParametersValidation(sk8,nobody)"
    );
}

#[tokio::test]
async fn test_verb_prefixes() {
    let dispatcher = dispatcher(RoutingConfig::default());
    assert_eq!(body(&dispatcher, DispatchRequest::get("/test/user/7")).await, "getUser(7)");
    assert_eq!(body(&dispatcher, DispatchRequest::post("/test/user/7")).await, "postUser(7)");

    let error = dispatcher.route(&DispatchRequest::put("/test/user/7")).await.unwrap_err();
    assert!(matches!(error, DispatchError::MethodNotFound { .. }));
}

#[tokio::test]
async fn test_prefix_map_override() {
    let dispatcher = dispatcher(RoutingConfig::default().with_prefix("put", "update"));
    assert_eq!(body(&dispatcher, DispatchRequest::put("/test/user/7")).await, "updateUser(7)");
    assert_eq!(
        body(&dispatcher, DispatchRequest::new(Method::PATCH, "/test")).await,
        "allIndex()"
    );
}

#[tokio::test]
async fn test_settings_from_configuration_file_contents() {
    let repository = ConfigRepository::from_yaml_str(
        r#"
http:
  parameterValidation: true
  routing:
    prefixMap:
      put: update
"#,
    )
    .unwrap();
    let dispatcher = dispatcher(RoutingConfig::from_repository(&repository).unwrap());

    assert_eq!(body(&dispatcher, DispatchRequest::put("/test/user/7")).await, "updateUser(7)");
    let error = dispatcher
        .route(&DispatchRequest::get("/test/parameters/validation/sk8/x@y.io"))
        .await
        .unwrap_err();
    assert!(matches!(error, DispatchError::InvalidUserInput { .. }));
}

#[tokio::test]
async fn test_optional_and_variadic_arity() {
    let dispatcher = dispatcher(RoutingConfig::default());
    assert_eq!(body(&dispatcher, DispatchRequest::get("/test/optional/a")).await, "allOptional(a)");
    assert_eq!(
        body(&dispatcher, DispatchRequest::get("/test/optional/a/b")).await,
        "allOptional(a,b)"
    );
    assert!(dispatcher
        .route(&DispatchRequest::get("/test/optional/a/b/c"))
        .await
        .is_err());
    assert_eq!(
        body(&dispatcher, DispatchRequest::get("/test/files/a/b/c")).await,
        "allFiles(a,b,c)"
    );
}

#[tokio::test]
async fn test_private_action_is_not_reachable() {
    let dispatcher = dispatcher(RoutingConfig::default());
    let error = dispatcher.route(&DispatchRequest::get("/test/hidden")).await.unwrap_err();
    assert!(matches!(error, DispatchError::MethodNotFound { .. }));
}

#[tokio::test]
async fn test_parameters_are_decoded_once() {
    let dispatcher = dispatcher(RoutingConfig::default());
    assert_eq!(
        body(&dispatcher, DispatchRequest::get("/test/parameters/john%20doe/a%2Fb")).await,
        "allParameters(john doe,a/b)"
    );
}

#[tokio::test]
async fn test_handler_errors_are_returned_unchanged() {
    let dispatcher = dispatcher(RoutingConfig::default());
    let error = dispatcher.route(&DispatchRequest::get("/test/broken")).await.unwrap_err();
    assert!(matches!(error, DispatchError::Controller(HttpError::BadRequest { .. })));
}

#[tokio::test]
async fn test_handler_not_found_without_fallback() {
    let registry = ControllerRegistry::new();
    registry.register::<TestController>().unwrap();
    let dispatcher = Dispatcher::new(Arc::new(registry), RoutingConfig::default());

    let error = dispatcher.route(&DispatchRequest::get("/unknown")).await.unwrap_err();
    assert!(matches!(error, DispatchError::HandlerNotFound { .. }));
}

#[test]
fn test_resolve_reports_route() {
    let dispatcher = dispatcher(RoutingConfig::default());
    let route = dispatcher
        .resolve(&DispatchRequest::get("/test/parameters/one/two"))
        .unwrap();

    assert_eq!(route.handler.name, TestController::NAME);
    assert_eq!(route.handler.matched, 1);
    assert_eq!(route.action.name, "allParameters");
    assert_eq!(route.parameters, vec!["one", "two"]);
}

#[test]
fn test_fallback_route_keeps_every_segment() {
    let dispatcher = dispatcher(RoutingConfig::default());
    let route = dispatcher.resolve(&DispatchRequest::get("/")).unwrap();

    assert_eq!(route.handler.name, HomeController::NAME);
    assert!(route.handler.fallback);
}

struct FailingFactory;

impl HandlerFactory for FailingFactory {
    fn instantiate(&self, handler: &str) -> HttpResult<Arc<dyn Controller>> {
        Err(HttpError::service_resolution(handler))
    }
}

#[tokio::test]
async fn test_factory_failure_is_a_controller_error() {
    let registry = registry();
    let dispatcher = Dispatcher::with_collaborators(
        registry.clone(),
        registry,
        Arc::new(FailingFactory),
        RoutingConfig::default(),
    );

    assert!(dispatcher.resolve(&DispatchRequest::get("/test")).is_ok());
    let error = dispatcher.route(&DispatchRequest::get("/test")).await.unwrap_err();
    assert!(matches!(
        error,
        DispatchError::Controller(HttpError::ServiceResolutionFailed { .. })
    ));
}
