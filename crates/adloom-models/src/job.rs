//! Background job records for progress polling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique job identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Job lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    /// Accepted, not yet started.
    #[default]
    Queued,
    /// Workflow is running.
    Processing,
    /// Finished successfully.
    Completed,
    /// Ended with an error.
    Failed,
}

impl JobState {
    /// Get string representation of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Queued => "queued",
            JobState::Processing => "processing",
            JobState::Completed => "completed",
            JobState::Failed => "failed",
        }
    }

    /// Check if this is a terminal state (no more updates expected).
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed)
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ingestion workflow stage.
///
/// Stages advance strictly forward. A video found in the cache jumps from
/// `CheckingCache` straight to `Ready`; any stage may fall to `Error`.
/// `Ready` and `Error` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestStage {
    CheckingCache,
    Uploading,
    WaitingForFileProcessing,
    CreatingGroup,
    WaitingForGroupReady,
    WritingCache,
    Ready,
    Error,
}

impl IngestStage {
    /// Get string representation of the stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            IngestStage::CheckingCache => "checking_cache",
            IngestStage::Uploading => "uploading",
            IngestStage::WaitingForFileProcessing => "waiting_for_file_processing",
            IngestStage::CreatingGroup => "creating_group",
            IngestStage::WaitingForGroupReady => "waiting_for_group_ready",
            IngestStage::WritingCache => "writing_cache",
            IngestStage::Ready => "ready",
            IngestStage::Error => "error",
        }
    }

    /// Check if this is a terminal stage.
    pub fn is_terminal(&self) -> bool {
        matches!(self, IngestStage::Ready | IngestStage::Error)
    }

    /// Nominal progress percentage on entering this stage.
    pub fn progress(&self) -> u8 {
        match self {
            IngestStage::CheckingCache => 5,
            IngestStage::Uploading => 15,
            IngestStage::WaitingForFileProcessing => 40,
            IngestStage::CreatingGroup => 55,
            IngestStage::WaitingForGroupReady => 80,
            IngestStage::WritingCache => 95,
            IngestStage::Ready => 100,
            IngestStage::Error => 100,
        }
    }
}

impl std::fmt::Display for IngestStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tracked background run (ingestion or branding pipeline).
///
/// Held in the in-memory job registry and returned verbatim by the job
/// status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    /// Unique job identifier
    pub id: JobId,
    /// Video this job operates on
    pub video_name: String,
    /// Current lifecycle state
    pub state: JobState,
    /// Current workflow stage, once the run has started
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    /// Progress percentage (0-100)
    pub progress: u8,
    /// Latest human-readable status message
    pub message: String,
    /// File identifier, once known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    /// Group identifier, once known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    /// When the job was accepted
    pub created_at: DateTime<Utc>,
    /// When the record was last updated
    pub updated_at: DateTime<Utc>,
}

impl JobRecord {
    /// Create a queued record for a video.
    pub fn new(video_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: JobId::new(),
            video_name: video_name.into(),
            state: JobState::Queued,
            stage: None,
            progress: 0,
            message: "Queued".to_string(),
            file_id: None,
            group_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Enter an ingestion stage, taking its nominal progress value.
    pub fn advance(&mut self, stage: IngestStage, message: impl Into<String>) {
        self.state = JobState::Processing;
        self.stage = Some(stage.as_str().to_string());
        self.progress = stage.progress();
        self.message = message.into();
        self.updated_at = Utc::now();
    }

    /// Enter an arbitrary step with an explicit progress value.
    pub fn update_step(&mut self, step: impl Into<String>, progress: u8, message: impl Into<String>) {
        self.state = JobState::Processing;
        self.stage = Some(step.into());
        self.progress = progress.min(100);
        self.message = message.into();
        self.updated_at = Utc::now();
    }

    /// Mark the run completed.
    pub fn complete(&mut self, message: impl Into<String>) {
        self.state = JobState::Completed;
        self.stage = Some(IngestStage::Ready.as_str().to_string());
        self.progress = 100;
        self.message = message.into();
        self.updated_at = Utc::now();
    }

    /// Mark the run failed. Progress keeps its last value so the UI shows
    /// where the run stopped.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.state = JobState::Failed;
        self.stage = Some(IngestStage::Error.as_str().to_string());
        self.message = message.into();
        self.updated_at = Utc::now();
    }

    /// Check if the run is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_id_unique_and_displayable() {
        let a = JobId::new();
        let b = JobId::new();
        assert_ne!(a, b);
        assert_eq!(a.to_string(), a.as_str());
    }

    #[test]
    fn test_job_record_creation() {
        let record = JobRecord::new("goku.mp4");
        assert_eq!(record.state, JobState::Queued);
        assert_eq!(record.progress, 0);
        assert!(record.stage.is_none());
        assert!(!record.is_terminal());
    }

    #[test]
    fn test_job_record_transitions() {
        let mut record = JobRecord::new("goku.mp4");

        record.advance(IngestStage::Uploading, "Uploading goku.mp4");
        assert_eq!(record.state, JobState::Processing);
        assert_eq!(record.stage.as_deref(), Some("uploading"));
        assert_eq!(record.progress, 15);

        record.complete("Video ready for querying");
        assert_eq!(record.state, JobState::Completed);
        assert_eq!(record.progress, 100);
        assert!(record.is_terminal());
    }

    #[test]
    fn test_job_record_fail_keeps_progress() {
        let mut record = JobRecord::new("goku.mp4");
        record.advance(IngestStage::WaitingForFileProcessing, "Waiting");
        let before = record.progress;

        record.fail("File processing failed: corrupt container");
        assert_eq!(record.state, JobState::Failed);
        assert_eq!(record.progress, before);
        assert_eq!(record.stage.as_deref(), Some("error"));
        assert!(record.message.contains("corrupt container"));
    }

    #[test]
    fn test_ingest_stage_progress_is_monotonic() {
        let forward = [
            IngestStage::CheckingCache,
            IngestStage::Uploading,
            IngestStage::WaitingForFileProcessing,
            IngestStage::CreatingGroup,
            IngestStage::WaitingForGroupReady,
            IngestStage::WritingCache,
            IngestStage::Ready,
        ];
        for pair in forward.windows(2) {
            assert!(pair[0].progress() < pair[1].progress());
        }
    }

    #[test]
    fn test_update_step_clamps_progress() {
        let mut record = JobRecord::new("goku.mp4");
        record.update_step("branding", 250, "Branding snippet 3/4");
        assert_eq!(record.progress, 100);
        assert_eq!(record.stage.as_deref(), Some("branding"));
    }
}
