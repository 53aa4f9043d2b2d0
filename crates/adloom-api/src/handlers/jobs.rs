//! Job status handlers.

use axum::extract::{Path, State};
use axum::Json;

use adloom_models::{JobId, JobRecord};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Fetch the current record for a background job.
/// `GET /jobs/{job_id}`
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<JobRecord>> {
    let record = state
        .registry
        .get(&JobId::from_string(job_id))
        .await
        .ok_or_else(|| ApiError::not_found("Job not found"))?;

    Ok(Json(record))
}
