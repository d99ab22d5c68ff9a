//! Error types for the s2am-alerts crate.

use thiserror::Error;

/// Errors that can occur while translating or forwarding an alert.
#[derive(Debug, Error)]
pub enum AlertError {
    /// The inbound webhook body could not be decoded.
    #[error("invalid payload: {reason}")]
    InvalidPayload {
        /// The reason the payload was rejected.
        reason: String,
    },

    /// The configured end-time offset is not a valid duration.
    #[error("invalid duration {input:?}: {reason}")]
    InvalidDuration {
        /// The offending duration string.
        input: String,
        /// The reason the duration is invalid.
        reason: String,
    },

    /// The destination base URL cannot be used.
    #[error("invalid destination url {url:?}: {reason}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// The reason the URL is invalid.
        reason: String,
    },

    /// The request to the destination could not be completed.
    #[error("request to {url} failed: {reason}")]
    Transport {
        /// The URL that was being called.
        url: String,
        /// The underlying transport error.
        reason: String,
    },

    /// The destination answered with something other than 200.
    #[error("destination returned {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code returned by the destination.
        status: u16,
        /// Response body returned by the destination.
        body: String,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    SerializationError(String),
}

impl AlertError {
    /// Returns true if the error was caused by the inbound request rather than
    /// by the destination.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidPayload { .. } | Self::InvalidDuration { .. })
    }
}

impl From<serde_json::Error> for AlertError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Result type for alert operations.
pub type Result<T> = std::result::Result<T, AlertError>;
