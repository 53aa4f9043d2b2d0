//! Adapter error types.

use thiserror::Error;

/// Result type for adapter calls.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised by the service adapters.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A required credential or setting is missing. Never retried.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request could not be sent, or the service answered non-2xx.
    /// Carries the upstream status code and body text where available.
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The service answered 2xx with a body that did not parse.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::RequestFailed(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }
}
