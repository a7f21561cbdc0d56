//! Routing failures
//!
//! Every failure the dispatcher reports is one of three kinds. Errors raised
//! by the handler itself travel in [`DispatchError::Controller`] untouched.

use super::http_error::HttpError;
use axum::http::StatusCode;
use thiserror::Error;

/// Result type for dispatch operations
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Why a request could not be dispatched
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No handler could be located, the fallback included
    #[error("{}", display_or(.message, "Handler not found"))]
    HandlerNotFound { message: Option<String> },

    /// A handler was located but no acceptable action was
    #[error("{}", display_or(.message, "Method not found"))]
    MethodNotFound { message: Option<String> },

    /// Parameters failed validation or could not be decoded
    #[error("{}", display_or(.message, "Invalid user input"))]
    InvalidUserInput { message: Option<String> },

    /// Raised by the invoked handler
    #[error(transparent)]
    Controller(#[from] HttpError),
}

fn display_or<'a>(message: &'a Option<String>, fallback: &'a str) -> &'a str {
    message.as_deref().filter(|m| !m.is_empty()).unwrap_or(fallback)
}

impl DispatchError {
    pub fn handler_not_found() -> Self {
        DispatchError::HandlerNotFound { message: None }
    }

    pub fn method_not_found() -> Self {
        DispatchError::MethodNotFound { message: None }
    }

    pub fn invalid_user_input<T: Into<String>>(message: T) -> Self {
        DispatchError::InvalidUserInput {
            message: Some(message.into()),
        }
    }

    /// Attach a message to a routing failure
    ///
    /// Handler errors keep their own message.
    pub fn with_message<T: Into<String>>(self, message: T) -> Self {
        let message = Some(message.into());
        match self {
            DispatchError::HandlerNotFound { .. } => DispatchError::HandlerNotFound { message },
            DispatchError::MethodNotFound { .. } => DispatchError::MethodNotFound { message },
            DispatchError::InvalidUserInput { .. } => DispatchError::InvalidUserInput { message },
            other => other,
        }
    }

    /// The explicit message, if one was given and is not empty
    pub fn message(&self) -> Option<String> {
        match self {
            DispatchError::HandlerNotFound { message }
            | DispatchError::MethodNotFound { message }
            | DispatchError::InvalidUserInput { message } => {
                message.clone().filter(|m| !m.is_empty())
            }
            DispatchError::Controller(err) => Some(err.to_string()),
        }
    }

    /// Check if this is one of the two "resource not found" kinds
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DispatchError::HandlerNotFound { .. } | DispatchError::MethodNotFound { .. }
        )
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            DispatchError::HandlerNotFound { .. } => "HANDLER_NOT_FOUND",
            DispatchError::MethodNotFound { .. } => "METHOD_NOT_FOUND",
            DispatchError::InvalidUserInput { .. } => "INVALID_USER_INPUT",
            DispatchError::Controller(err) => err.error_code(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            DispatchError::HandlerNotFound { .. } | DispatchError::MethodNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            DispatchError::InvalidUserInput { .. } => StatusCode::BAD_REQUEST,
            DispatchError::Controller(err) => err.status_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_falls_back_to_kind() {
        assert_eq!(DispatchError::handler_not_found().to_string(), "Handler not found");
        assert_eq!(DispatchError::method_not_found().to_string(), "Method not found");
        assert_eq!(
            DispatchError::method_not_found().with_message("").to_string(),
            "Method not found"
        );
        assert_eq!(
            DispatchError::invalid_user_input("number: bad").to_string(),
            "number: bad"
        );
    }

    #[test]
    fn test_message_is_optional() {
        assert_eq!(DispatchError::handler_not_found().message(), None);
        assert_eq!(
            DispatchError::handler_not_found()
                .with_message("no such page")
                .message()
                .as_deref(),
            Some("no such page")
        );
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(DispatchError::handler_not_found().status_code(), StatusCode::NOT_FOUND);
        assert_eq!(DispatchError::method_not_found().status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            DispatchError::invalid_user_input("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            DispatchError::from(HttpError::internal("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_controller_errors_pass_through() {
        let error = DispatchError::from(HttpError::bad_request("missing body"));
        assert!(!error.is_not_found());
        assert_eq!(error.error_code(), "BAD_REQUEST");
        assert_eq!(error.to_string(), "Invalid request: missing body");

        let error = error.with_message("ignored");
        assert_eq!(error.to_string(), "Invalid request: missing body");
    }
}
