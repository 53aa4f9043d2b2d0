//! Remote status enums reported by the understanding service.

use serde::{Deserialize, Serialize};

/// Processing status of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingStatus {
    /// Uploaded but not yet picked up.
    Unprocessed,
    /// Processing in progress.
    Processing,
    /// Processing finished successfully.
    Success,
    /// Processing failed; the status payload carries an error message.
    Failure,
}

impl ProcessingStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStatus::Unprocessed => "UNPROCESSED",
            ProcessingStatus::Processing => "PROCESSING",
            ProcessingStatus::Success => "SUCCESS",
            ProcessingStatus::Failure => "FAILURE",
        }
    }

    /// Check if this is a terminal state (no more polling useful).
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProcessingStatus::Success | ProcessingStatus::Failure)
    }
}

impl std::fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Build status of a queryable group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphStatus {
    /// Group accepted, build not started.
    Pending,
    /// Graph build in progress.
    Building,
    /// Group is queryable.
    Ready,
    /// Build failed; the group cannot be queried.
    Failed,
}

impl GraphStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphStatus::Pending => "pending",
            GraphStatus::Building => "building",
            GraphStatus::Ready => "ready",
            GraphStatus::Failed => "failed",
        }
    }

    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GraphStatus::Ready | GraphStatus::Failed)
    }
}

impl std::fmt::Display for GraphStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
