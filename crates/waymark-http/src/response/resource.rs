//! The value a handler action produces

use crate::errors::HttpResult;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Body of a resource produced by a handler
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceBody {
    Text(String),
    Json(Value),
}

/// Opaque resource returned by a successful dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceResponse {
    body: ResourceBody,
}

impl ResourceResponse {
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            body: ResourceBody::Text(body.into()),
        }
    }

    /// Serialize any value as a JSON resource
    pub fn json<T: Serialize>(value: &T) -> HttpResult<Self> {
        Ok(Self {
            body: ResourceBody::Json(serde_json::to_value(value)?),
        })
    }

    pub fn body(&self) -> &ResourceBody {
        &self.body
    }

    pub fn content_type(&self) -> &'static str {
        match self.body {
            ResourceBody::Text(_) => "text/plain; charset=utf-8",
            ResourceBody::Json(_) => "application/json",
        }
    }

    pub fn into_body_string(self) -> String {
        match self.body {
            ResourceBody::Text(text) => text,
            ResourceBody::Json(value) => value.to_string(),
        }
    }
}

impl fmt::Display for ResourceResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            ResourceBody::Text(text) => f.write_str(text),
            ResourceBody::Json(value) => write!(f, "{}", value),
        }
    }
}

impl From<String> for ResourceResponse {
    fn from(body: String) -> Self {
        Self::text(body)
    }
}

impl From<&str> for ResourceResponse {
    fn from(body: &str) -> Self {
        Self::text(body)
    }
}
