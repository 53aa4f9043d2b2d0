//! Ingestion cache management handlers.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use adloom_models::CacheEntry;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Request to record a processed video in the cache.
#[derive(Deserialize)]
pub struct WriteCacheRequest {
    pub video_name: String,
    pub file_id: String,
    pub group_id: String,
}

/// Query parameters for the cache delete endpoint.
#[derive(Deserialize)]
pub struct DeleteCacheParams {
    #[serde(default)]
    pub video_name: Option<String>,
}

/// Cache delete acknowledgement.
#[derive(Serialize)]
pub struct DeleteCacheResponse {
    pub removed: bool,
}

/// Return the full cache table.
/// `GET /cache`
pub async fn list_cache(
    State(state): State<AppState>,
) -> ApiResult<Json<HashMap<String, CacheEntry>>> {
    let entries = state.cache.entries().await?;
    Ok(Json(entries))
}

/// Record a processed video, overwriting any existing entry.
/// `POST /cache`
pub async fn write_cache(
    State(state): State<AppState>,
    Json(body): Json<WriteCacheRequest>,
) -> ApiResult<(StatusCode, Json<CacheEntry>)> {
    if body.video_name.trim().is_empty() {
        return Err(ApiError::bad_request("video_name must not be empty"));
    }

    let entry = CacheEntry::new(body.file_id, body.group_id);
    state.cache.write(&body.video_name, &entry).await?;
    info!(video = %body.video_name, group_id = %entry.group_id, "Cache entry written");

    Ok((StatusCode::CREATED, Json(entry)))
}

/// Remove one cache entry, or clear the whole table when no name is given.
/// `DELETE /cache[?video_name=...]`
pub async fn reset_cache(
    State(state): State<AppState>,
    Query(params): Query<DeleteCacheParams>,
) -> ApiResult<Json<DeleteCacheResponse>> {
    match params.video_name {
        Some(name) => {
            let removed = state.cache.remove(&name).await?;
            info!(video = %name, removed, "Cache entry delete requested");
            Ok(Json(DeleteCacheResponse { removed }))
        }
        None => {
            state.cache.clear().await?;
            info!("Cache cleared");
            Ok(Json(DeleteCacheResponse { removed: true }))
        }
    }
}
