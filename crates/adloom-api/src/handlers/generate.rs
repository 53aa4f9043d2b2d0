//! Standalone video generation handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use adloom_client::GenerationParameters;

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;

const DEFAULT_DURATION_SECONDS: u32 = 8;
const DEFAULT_ASPECT_RATIO: &str = "16:9";

/// Generation request.
#[derive(Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    #[serde(default)]
    pub aspect_ratio: Option<String>,
}

/// Generation acknowledgement.
#[derive(Serialize)]
pub struct GenerateResponse {
    pub operation_name: String,
}

/// Submit a video generation job.
///
/// The operation is not polled here; this is kick-off only. Callers track
/// the returned operation name themselves.
/// `POST /generate`
pub async fn generate_video(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> ApiResult<(StatusCode, Json<GenerateResponse>)> {
    if body.prompt.trim().is_empty() {
        return Err(ApiError::bad_request("prompt must not be empty"));
    }

    let parameters = GenerationParameters {
        duration_seconds: Some(body.duration_seconds.unwrap_or(DEFAULT_DURATION_SECONDS)),
        aspect_ratio: Some(
            body.aspect_ratio
                .unwrap_or_else(|| DEFAULT_ASPECT_RATIO.to_string()),
        ),
    };

    let model = &state.config.veo_model;
    let operation_name = state
        .gemini
        .predict_long_running(model, &body.prompt, Some(parameters))
        .await?;

    metrics::record_generation_request(model);
    info!(model = %model, operation = %operation_name, "Generation submitted");

    Ok((StatusCode::ACCEPTED, Json(GenerateResponse { operation_name })))
}
