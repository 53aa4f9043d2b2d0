//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use adloom_client::ClientError;
use adloom_engine::EngineError;
use adloom_storage::StorageError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Missing credential or broken setup; the message names the fix.
    #[error("{0}")]
    Configuration(String),

    /// An external service request failed; carries the upstream detail.
    #[error("{0}")]
    Upstream(String),

    /// A remote job reached a terminal failure state.
    #[error("Remote job failed: {0}")]
    JobFailed(String),

    /// Polling gave up before the remote job finished.
    #[error("{0}")]
    PollTimeout(String),

    #[error("Cache error: {0}")]
    Cache(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) | ApiError::JobFailed(_) => StatusCode::BAD_GATEWAY,
            ApiError::PollTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Configuration(_) | ApiError::Cache(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Configuration(msg) => ApiError::Configuration(msg),
            ClientError::RequestFailed(msg) | ClientError::InvalidResponse(msg) => {
                ApiError::Upstream(msg)
            }
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Client(inner) => inner.into(),
            EngineError::Storage(inner) => ApiError::Cache(inner),
            EngineError::JobFailed(msg) => ApiError::JobFailed(msg),
            EngineError::PollTimeout {
                operation,
                attempts,
            } => ApiError::PollTimeout(format!(
                "{} did not finish after {} status checks",
                operation, attempts
            )),
            EngineError::VideoNotFound(name) => {
                ApiError::NotFound(format!("Video not found: {}", name))
            }
            EngineError::Io(e) => ApiError::Internal(e.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Hide internal detail in production. Upstream and configuration
        // messages stay verbatim; they are what the caller acts on.
        let error = match &self {
            ApiError::Internal(_) | ApiError::Cache(_) => {
                if std::env::var("ENVIRONMENT").unwrap_or_default() == "production" {
                    "An internal error occurred".to_string()
                } else {
                    self.to_string()
                }
            }
            _ => self.to_string(),
        };

        let body = ErrorResponse { error };

        (status, Json(body)).into_response()
    }
}
