//! Fixed-interval polling of asynchronous remote jobs.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use adloom_client::{ClientResult, FileStatus, GroupStatus, OperationStatus};
use adloom_models::{GraphStatus, ProcessingStatus};

use crate::error::{EngineError, EngineResult};

/// Knobs for one polling loop.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Name used in logs and timeout errors.
    pub operation: String,
    /// Total status checks before giving up.
    pub max_attempts: u32,
    /// Fixed delay between consecutive checks.
    pub interval: Duration,
}

impl PollConfig {
    pub fn new(operation: impl Into<String>, max_attempts: u32, interval: Duration) -> Self {
        Self {
            operation: operation.into(),
            max_attempts,
            interval,
        }
    }

    /// File processing: ~2 minutes at 2s intervals.
    pub fn file_processing() -> Self {
        Self::new("File processing", 60, Duration::from_secs(2))
    }

    /// Graph builds take longer: ~10 minutes at 5s intervals.
    pub fn graph_build() -> Self {
        Self::new("Graph build", 120, Duration::from_secs(5))
    }

    /// Generation operations: ~10 minutes at 5s intervals.
    pub fn generation() -> Self {
        Self::new("Video generation", 120, Duration::from_secs(5))
    }
}

/// How one observed status steers the loop.
#[derive(Debug, Clone, PartialEq)]
pub enum JobVerdict {
    /// Terminal success; stop and hand the status back.
    Ready,
    /// Still running; wait out the interval and check again.
    InProgress,
    /// Terminal failure with the remote reason; stop immediately.
    Failed(String),
}

/// Terminal outcome of a polling loop.
#[derive(Debug)]
pub enum PollOutcome<S> {
    /// The job reached its ready state; carries the final status.
    Success(S),
    /// The job reported a terminal failure.
    Failed { message: String, attempts: u32 },
    /// All attempts elapsed without a terminal state.
    TimedOut { attempts: u32 },
}

/// Poll `fetch` until `verdict` reports a terminal state or attempts run out.
///
/// Exactly one `fetch` call per attempt, and no sleep after the final check.
/// Transport errors from `fetch` abort the loop immediately.
pub async fn poll_job<S, F, Fut, V>(
    config: &PollConfig,
    fetch: F,
    verdict: V,
) -> ClientResult<PollOutcome<S>>
where
    F: Fn() -> Fut,
    Fut: Future<Output = ClientResult<S>>,
    V: Fn(&S) -> JobVerdict,
{
    for attempt in 1..=config.max_attempts {
        let status = fetch().await?;
        match verdict(&status) {
            JobVerdict::Ready => {
                debug!(operation = %config.operation, attempt, "Job ready");
                return Ok(PollOutcome::Success(status));
            }
            JobVerdict::Failed(message) => {
                warn!(operation = %config.operation, attempt, %message, "Job failed");
                return Ok(PollOutcome::Failed {
                    message,
                    attempts: attempt,
                });
            }
            JobVerdict::InProgress => {
                debug!(
                    operation = %config.operation,
                    attempt,
                    max_attempts = config.max_attempts,
                    "Job still in progress"
                );
                if attempt < config.max_attempts {
                    tokio::time::sleep(config.interval).await;
                }
            }
        }
    }

    warn!(
        operation = %config.operation,
        attempts = config.max_attempts,
        "Polling timed out"
    );
    Ok(PollOutcome::TimedOut {
        attempts: config.max_attempts,
    })
}

/// Collapse a poll outcome into the final status or an engine error.
pub fn require_ready<S>(outcome: PollOutcome<S>, operation: &str) -> EngineResult<S> {
    match outcome {
        PollOutcome::Success(status) => Ok(status),
        PollOutcome::Failed { message, .. } => Err(EngineError::JobFailed(message)),
        PollOutcome::TimedOut { attempts } => Err(EngineError::PollTimeout {
            operation: operation.to_string(),
            attempts,
        }),
    }
}

/// Verdict for uploaded-file processing states.
pub fn file_verdict(status: &FileStatus) -> JobVerdict {
    match status.processing_status {
        ProcessingStatus::Success => JobVerdict::Ready,
        ProcessingStatus::Failure => JobVerdict::Failed(
            status
                .error_message
                .clone()
                .unwrap_or_else(|| "File processing failed".to_string()),
        ),
        ProcessingStatus::Unprocessed | ProcessingStatus::Processing => JobVerdict::InProgress,
    }
}

/// Verdict for group graph builds.
pub fn graph_verdict(status: &GroupStatus) -> JobVerdict {
    match status.graph_status {
        GraphStatus::Ready => JobVerdict::Ready,
        GraphStatus::Failed => JobVerdict::Failed(
            status
                .error_message
                .clone()
                .unwrap_or_else(|| "Graph build failed".to_string()),
        ),
        GraphStatus::Pending | GraphStatus::Building => JobVerdict::InProgress,
    }
}

/// Verdict for long-running generation operations.
pub fn operation_verdict(status: &OperationStatus) -> JobVerdict {
    if !status.done {
        return JobVerdict::InProgress;
    }
    match &status.error {
        Some(error) => JobVerdict::Failed(error.message.clone()),
        None => JobVerdict::Ready,
    }
}
