//! Result and error types for the core library

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::messages::format_error_or;
use super::validation::ValidationErrors;

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    /// The endpoint needs an access token and none is stored
    #[error("Authentication required: no access token found. Please log in.")]
    Unauthenticated,

    /// The backend answered outside the 2xx range. `payload` is the
    /// response body as sent, or the status reason when the body was
    /// not JSON.
    #[error("{}", describe_failure(.status, .payload))]
    RequestFailed { status: u16, payload: JsonValue },

    /// Network level failure (DNS, connect, TLS, body read)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a request failure from a status code and payload
    pub fn request_failed(status: u16, payload: JsonValue) -> Self {
        Self::RequestFailed { status, payload }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    /// HTTP status for request failures
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Backend error body for request failures
    pub fn payload(&self) -> Option<&JsonValue> {
        match self {
            Self::RequestFailed { payload, .. } => Some(payload),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

fn describe_failure(status: &u16, payload: &JsonValue) -> String {
    format_error_or(payload, &format!("Request failed with status {}", status))
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Operation result with optional context (for `--json` output)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub context: Option<HashMap<String, serde_json::Value>>,
}

impl<T> OperationResult<T> {
    /// Create a successful result
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            context: None,
        }
    }

    /// Create a failed result
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            context: None,
        }
    }

    /// Create a failed result with context
    pub fn fail_with_context(
        error: impl Into<String>,
        context: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            context: Some(context),
        }
    }
}

impl<T> From<Result<T>> for OperationResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => {
                let message = e.to_string();
                match e {
                    Error::RequestFailed { status, payload } => {
                        let mut context = HashMap::new();
                        context.insert("status".to_string(), serde_json::json!(status));
                        context.insert("payload".to_string(), payload);
                        Self::fail_with_context(message, context)
                    }
                    _ => Self::fail(message),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_result_ok() {
        let result: OperationResult<i32> = OperationResult::ok(42);
        assert!(result.success);
        assert_eq!(result.data, Some(42));
        assert!(result.error.is_none());
    }

    #[test]
    fn test_request_failed_display_uses_payload() {
        let err = Error::request_failed(400, json!({"email": ["Enter a valid email address."]}));
        assert_eq!(err.to_string(), "email: Enter a valid email address.");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_request_failed_display_falls_back_to_status() {
        let err = Error::request_failed(502, json!({"code": 7}));
        assert_eq!(err.to_string(), "Request failed with status 502");
    }

    #[test]
    fn test_from_result_keeps_payload_context() {
        let err: Result<i32> = Err(Error::request_failed(403, json!({"error": "Access denied"})));
        let result: OperationResult<i32> = err.into();
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("error: Access denied"));
        let context = result.context.unwrap();
        assert_eq!(context["status"], json!(403));
        assert_eq!(context["payload"], json!({"error": "Access denied"}));
    }

    #[test]
    fn test_unauthenticated_has_no_status() {
        let err = Error::Unauthenticated;
        assert!(err.is_unauthenticated());
        assert!(err.status().is_none());
        assert!(err.payload().is_none());
    }
}
