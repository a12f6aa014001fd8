//! Error handling for the spamsieve service.
//!
//! One taxonomy covers the whole crate: input validation failures map to
//! 4xx responses, a missing or rejected model artifact maps to 503, and
//! everything else is an internal 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Main error type for the spamsieve service.
#[derive(Error, Debug)]
pub enum SieveError {
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Model unavailable: {reason}")]
    ModelUnavailable { reason: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Training failed: {message}")]
    Training { message: String },

    #[error("I/O operation failed: {operation}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Type alias for Result with SieveError.
pub type SieveResult<T> = Result<T, SieveError>;

impl SieveError {
    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a model-unavailable error
    pub fn model_unavailable(reason: impl Into<String>) -> Self {
        Self::ModelUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a training error
    pub fn training(message: impl Into<String>) -> Self {
        Self::Training {
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Create a serialization error
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
struct ErrBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for SieveError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            SieveError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                format!("{field} {message}"),
                None,
            ),
            SieveError::ModelUnavailable { reason } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Model unavailable".to_string(),
                Some(reason.clone()),
            ),
            SieveError::Config { .. }
            | SieveError::Training { .. }
            | SieveError::Io { .. }
            | SieveError::Serialization { .. }
            | SieveError::Internal { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to make prediction".to_string(),
                Some(self.to_string()),
            ),
        };

        (status, Json(ErrBody { error, details })).into_response()
    }
}

impl From<serde_json::Error> for SieveError {
    fn from(err: serde_json::Error) -> Self {
        SieveError::serialization("json_operation", err)
    }
}

impl From<std::io::Error> for SieveError {
    fn from(err: std::io::Error) -> Self {
        SieveError::io("io_operation", err)
    }
}

impl From<figment::Error> for SieveError {
    fn from(err: figment::Error) -> Self {
        SieveError::config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let validation = SieveError::validation("message", "is required");
        assert!(validation.to_string().contains("Validation error"));

        let unavailable = SieveError::model_unavailable("artifact missing");
        assert!(unavailable.to_string().contains("artifact missing"));
    }

    #[test]
    fn test_error_chaining() {
        use std::error::Error;

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let sieve_err = SieveError::io("reading model artifact", io_err);

        assert!(sieve_err.source().is_some());
        assert!(sieve_err.to_string().contains("I/O operation failed"));
    }
}
