//! JSON-RPC error type and the mapping from backend errors.

use crate::domain::BackendError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// JSON-RPC 2.0 error codes used by the Bor methods.
pub mod codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;

    pub const SERVER_ERROR: i32 = -32000;
    pub const RESOURCE_NOT_FOUND: i32 = -32001;
    pub const RESOURCE_UNAVAILABLE: i32 = -32002;
    pub const METHOD_NOT_SUPPORTED: i32 = -32004;
    pub const REQUEST_CANCELLED: i32 = -32006;
}

/// JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(code: i32, message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(
            codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", method),
        )
    }

    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::new(
            codes::INVALID_PARAMS,
            format!("Invalid params: {}", details.into()),
        )
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(
            codes::INTERNAL_ERROR,
            format!("Internal error: {}", details.into()),
        )
    }

    /// Method exists but this node variant cannot serve it.
    pub fn method_not_supported(method: &str) -> Self {
        Self::new(
            codes::METHOD_NOT_SUPPORTED,
            format!("Method not supported: {}", method),
        )
    }

    /// Request cancelled before it was issued.
    pub fn cancelled(method: &str) -> Self {
        Self::new(
            codes::REQUEST_CANCELLED,
            format!("Request cancelled: {}", method),
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        let code = match &err {
            BackendError::NotFound { .. } => codes::RESOURCE_NOT_FOUND,
            BackendError::EngineUnavailable => codes::RESOURCE_UNAVAILABLE,
            BackendError::NotImplemented { .. } => codes::METHOD_NOT_SUPPORTED,
            BackendError::Upstream(_) => codes::SERVER_ERROR,
        };
        Self::new(code, err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_syntax() || e.is_eof() {
            Self::new(codes::PARSE_ERROR, format!("Parse error: {}", e))
        } else {
            Self::invalid_params(e.to_string())
        }
    }
}

/// Result type for RPC handlers.
pub type ApiResult<T> = Result<T, ApiError>;
