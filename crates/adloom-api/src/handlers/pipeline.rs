//! Branding pipeline handler.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use adloom_models::{JobRecord, JobState, Placement};

use crate::error::{ApiError, ApiResult};
use crate::handlers::videos::JobAccepted;
use crate::metrics;
use crate::state::AppState;

/// Request to run the cut-detect / brand / merge pipeline on a video.
#[derive(Deserialize)]
pub struct PipelineRequest {
    pub video_name: String,
    #[serde(default)]
    pub placements: Vec<Placement>,
}

/// Start the branding pipeline for a video in the background.
/// `POST /pipeline`
pub async fn start_pipeline(
    State(state): State<AppState>,
    Json(body): Json<PipelineRequest>,
) -> ApiResult<(StatusCode, Json<JobAccepted>)> {
    if body.video_name.trim().is_empty() {
        return Err(ApiError::bad_request("video_name must not be empty"));
    }

    let record = JobRecord::new(&body.video_name);
    let job_id = record.id.clone();
    state.registry.insert(record).await;

    let pipeline = Arc::clone(&state.pipeline);
    let id = job_id.clone();
    tokio::spawn(async move {
        pipeline.run(id, body.video_name, body.placements).await;
    });

    metrics::record_pipeline_job();
    info!(job_id = %job_id, "Pipeline job accepted");

    Ok((
        StatusCode::ACCEPTED,
        Json(JobAccepted {
            job_id: job_id.as_str().to_string(),
            status: JobState::Queued.as_str().to_string(),
        }),
    ))
}
