//! Video upload, processing status, and ingestion handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use adloom_client::FileStatus;
use adloom_models::{JobRecord, JobState};

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;

/// Request naming a video file under the configured videos directory.
#[derive(Deserialize)]
pub struct VideoRequest {
    pub video_name: String,
}

/// Upload response.
#[derive(Serialize)]
pub struct UploadResponse {
    pub file_id: String,
}

/// Query parameters for the file status endpoint.
#[derive(Deserialize)]
pub struct FileStatusParams {
    #[serde(rename = "fileId")]
    pub file_id: String,
}

/// Acknowledgement for an accepted background job.
#[derive(Serialize)]
pub struct JobAccepted {
    pub job_id: String,
    pub status: String,
}

/// Upload a local video and trigger remote processing.
///
/// Returns the remote file id; processing completion is not awaited.
/// `POST /upload`
pub async fn upload_video(
    State(state): State<AppState>,
    Json(body): Json<VideoRequest>,
) -> ApiResult<Json<UploadResponse>> {
    if body.video_name.trim().is_empty() {
        return Err(ApiError::bad_request("video_name must not be empty"));
    }

    info!(video = %body.video_name, "Upload requested");
    let file_id = state.workflow.upload(&body.video_name).await?;

    Ok(Json(UploadResponse { file_id }))
}

/// Fetch processing status for an uploaded file.
/// `GET /status?fileId=...`
pub async fn file_status(
    State(state): State<AppState>,
    Query(params): Query<FileStatusParams>,
) -> ApiResult<Json<FileStatus>> {
    let status = state.graphon.file_status(&params.file_id).await?;
    Ok(Json(status))
}

/// Start the full ingestion workflow for a video in the background.
/// `POST /ingest`
pub async fn start_ingestion(
    State(state): State<AppState>,
    Json(body): Json<VideoRequest>,
) -> ApiResult<(StatusCode, Json<JobAccepted>)> {
    if body.video_name.trim().is_empty() {
        return Err(ApiError::bad_request("video_name must not be empty"));
    }

    let record = JobRecord::new(&body.video_name);
    let job_id = record.id.clone();
    state.registry.insert(record).await;

    let workflow = Arc::clone(&state.workflow);
    let id = job_id.clone();
    tokio::spawn(async move {
        workflow.run(id, body.video_name).await;
    });

    metrics::record_ingest_job();
    info!(job_id = %job_id, "Ingestion job accepted");

    Ok((
        StatusCode::ACCEPTED,
        Json(JobAccepted {
            job_id: job_id.as_str().to_string(),
            status: JobState::Queued.as_str().to_string(),
        }),
    ))
}
