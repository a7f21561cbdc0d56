//! Handler error types
//!
//! Errors raised by handlers themselves, as opposed to routing failures.
//! The dispatcher passes these through unchanged.

use axum::http::StatusCode;
use thiserror::Error;

/// Result type for handler operations
pub type HttpResult<T> = Result<T, HttpError>;

/// Errors raised while producing a resource
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Invalid request: {message}")]
    BadRequest { message: String },

    #[error("Internal server error: {message}")]
    InternalError { message: String },

    #[error("Service resolution failed: {service}")]
    ServiceResolutionFailed { service: String },
}

impl HttpError {
    /// Create a not found error
    pub fn not_found<T: Into<String>>(resource: T) -> Self {
        HttpError::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a bad request error
    pub fn bad_request<T: Into<String>>(message: T) -> Self {
        HttpError::BadRequest {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<T: Into<String>>(message: T) -> Self {
        HttpError::InternalError {
            message: message.into(),
        }
    }

    /// Create a service resolution error
    pub fn service_resolution<T: Into<String>>(service: T) -> Self {
        HttpError::ServiceResolutionFailed {
            service: service.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpError::NotFound { .. } => StatusCode::NOT_FOUND,
            HttpError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            HttpError::InternalError { .. } | HttpError::ServiceResolutionFailed { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get error code for consistent API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            HttpError::NotFound { .. } => "RESOURCE_NOT_FOUND",
            HttpError::BadRequest { .. } => "BAD_REQUEST",
            HttpError::InternalError { .. } => "INTERNAL_ERROR",
            HttpError::ServiceResolutionFailed { .. } => "SERVICE_RESOLUTION_FAILED",
        }
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        HttpError::InternalError {
            message: format!("JSON serialization error: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = HttpError::not_found("user 7");
        assert!(matches!(error, HttpError::NotFound { .. }));
        assert_eq!(error.to_string(), "Resource not found: user 7");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(HttpError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(HttpError::bad_request("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            HttpError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            HttpError::service_resolution("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(HttpError::bad_request("x").error_code(), "BAD_REQUEST");
        assert_eq!(
            HttpError::service_resolution("db").error_code(),
            "SERVICE_RESOLUTION_FAILED"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: HttpError = err.into();
        assert!(matches!(error, HttpError::InternalError { .. }));
    }
}
