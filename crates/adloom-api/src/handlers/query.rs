//! Natural-language query handler.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::{info, warn};

use adloom_models::QueryOutcome;

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;

/// Query request. An explicit `group_id` wins over `video_name`; with
/// neither, the most recently ingested video is queried.
#[derive(Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub video_name: Option<String>,
}

/// Ask a natural-language question about an ingested video.
/// `POST /query`
pub async fn query_video(
    State(state): State<AppState>,
    Json(body): Json<QueryRequest>,
) -> ApiResult<Json<QueryOutcome>> {
    if body.query.trim().is_empty() {
        return Err(ApiError::bad_request("query must not be empty"));
    }

    let group_id = match body.group_id {
        Some(id) => id,
        None => resolve_group(&state, body.video_name.as_deref()).await?,
    };

    info!(group_id = %group_id, "Querying group");
    let outcome = state.graphon.query_group(&group_id, &body.query).await?;

    Ok(Json(outcome))
}

/// Resolve a group id from the ingestion cache.
///
/// Read failures count as misses here; only the cache endpoints surface
/// them as errors.
async fn resolve_group(state: &AppState, video_name: Option<&str>) -> ApiResult<String> {
    let entry = match video_name {
        Some(name) => state.cache.read(name).await.unwrap_or_else(|e| {
            warn!(video = %name, error = %e, "Cache read failed, treating as miss");
            None
        }),
        None => match state.cache.entries().await {
            Ok(entries) => entries.into_values().max_by_key(|e| e.created_at),
            Err(e) => {
                warn!(error = %e, "Cache read failed, treating as miss");
                None
            }
        },
    };

    match entry {
        Some(entry) => {
            metrics::record_cache_lookup("hit");
            Ok(entry.group_id)
        }
        None => {
            metrics::record_cache_lookup("miss");
            Err(ApiError::not_found(
                "No processed video found. Run ingestion first.",
            ))
        }
    }
}
