//! Error types for the fleet management client.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised by the fleet management client.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum FleetClientError {
    /// Raised when the client configuration is incomplete.
    #[error("configuration error: {0}")]
    Config(String),
    /// Raised when the HTTP request could not be completed.
    #[error("transport error: {message}")]
    Transport {
        /// Message reported by the HTTP stack.
        message: String,
    },
    /// Raised when the service answered with a non-success status.
    #[error("fleet service returned status {status}: {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Response body, decoded lossily.
        message: String,
    },
    /// Raised when a response body cannot be decoded.
    #[error("failed to decode fleet service response: {message}")]
    Decode {
        /// Parser error message.
        message: String,
    },
    /// Raised while a requested deletion has not completed yet; the delete
    /// workflow treats this as retryable.
    #[error("deletion of router {tf_id} has not completed yet")]
    DeletionPending {
        /// Identifier of the router still being removed.
        tf_id: String,
    },
}

impl From<ConfigError> for FleetClientError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value.to_string())
    }
}
