//! The request shape the dispatcher works with

use axum::http::{Method, Request};

/// HTTP method plus raw, still percent-encoded path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRequest {
    method: Method,
    path: String,
}

impl DispatchRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    /// Build from a request target, dropping any query string or fragment
    pub fn from_target(method: Method, target: &str) -> Self {
        let end = target.find(|c| c == '?' || c == '#').unwrap_or(target.len());
        Self::new(method, &target[..end])
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Take method and path from an incoming HTTP request
    pub fn from_http<B>(request: &Request<B>) -> Self {
        Self::new(request.method().clone(), request.uri().path())
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}
