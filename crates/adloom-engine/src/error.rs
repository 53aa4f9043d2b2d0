//! Engine error types.

use thiserror::Error;

use adloom_client::ClientError;
use adloom_storage::StorageError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised while orchestrating remote jobs.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An adapter call failed (missing credential, transport, non-2xx).
    #[error("Service error: {0}")]
    Client(#[from] ClientError),

    /// The cache file could not be read or written.
    #[error("Cache error: {0}")]
    Storage(#[from] StorageError),

    /// A remote job reached a terminal failure state.
    #[error("Remote job failed: {0}")]
    JobFailed(String),

    /// Polling exhausted its attempts without a terminal state.
    #[error("{operation} did not finish after {attempts} status checks")]
    PollTimeout { operation: String, attempts: u32 },

    /// The named video does not exist in the videos directory.
    #[error("Video not found: {0}")]
    VideoNotFound(String),

    /// Local file IO failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
