//! Group creation and status handlers.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::info;

use adloom_client::GroupStatus;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Request to build a group from processed files.
#[derive(Deserialize)]
pub struct CreateGroupRequest {
    pub file_ids: Vec<String>,
}

/// Query parameters for the group status endpoint.
#[derive(Deserialize)]
pub struct GroupStatusParams {
    #[serde(rename = "groupId")]
    pub group_id: String,
}

/// Create a group over one or more processed files.
/// `POST /group`
pub async fn create_group(
    State(state): State<AppState>,
    Json(body): Json<CreateGroupRequest>,
) -> ApiResult<Json<GroupStatus>> {
    if body.file_ids.is_empty() {
        return Err(ApiError::bad_request("file_ids must not be empty"));
    }

    let group = state.graphon.create_group(&body.file_ids).await?;
    info!(group_id = %group.group_id, files = body.file_ids.len(), "Group created");

    Ok(Json(group))
}

/// Fetch build status for a group.
/// `GET /group?groupId=...`
pub async fn group_status(
    State(state): State<AppState>,
    Query(params): Query<GroupStatusParams>,
) -> ApiResult<Json<GroupStatus>> {
    let status = state.graphon.group_status(&params.group_id).await?;
    Ok(Json(status))
}
