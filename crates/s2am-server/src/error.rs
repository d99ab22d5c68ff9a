//! Error types for the relay server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use s2am_alerts::AlertError;
use serde::Serialize;
use thiserror::Error;

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur in the relay server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the specified address.
    #[error("failed to bind to {0}: {1}")]
    BindFailed(String, std::io::Error),

    /// Startup configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The inbound request was rejected.
    #[error("invalid request: {0}")]
    BadRequest(String),

    /// The alert could not be delivered to Alertmanager.
    #[error("forwarding to alertmanager failed: {0}")]
    ForwardFailed(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Returns the HTTP status and error tag used in responses.
    #[must_use]
    pub const fn status(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            Self::ForwardFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "forward_failed"),
            Self::BindFailed(_, _) | Self::InvalidConfig(_) | Self::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status();

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        };

        let json = serde_json::to_string(&body).unwrap_or_else(|_| {
            r#"{"error":"internal_error","message":"failed to serialize error"}"#.to_string()
        });

        (status, [("content-type", "application/json")], json).into_response()
    }
}

impl From<AlertError> for ServerError {
    fn from(err: AlertError) -> Self {
        match err {
            AlertError::InvalidPayload { .. } | AlertError::InvalidDuration { .. } => {
                Self::BadRequest(err.to_string())
            }
            AlertError::Transport { .. } | AlertError::UnexpectedStatus { .. } => {
                Self::ForwardFailed(err.to_string())
            }
            AlertError::InvalidUrl { .. } => Self::InvalidConfig(err.to_string()),
            AlertError::SerializationError(_) => Self::Internal(err.to_string()),
        }
    }
}
