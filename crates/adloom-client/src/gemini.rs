//! Client for the Gemini/Veo video generation API.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::http::{decode_json, ensure_success, send_error};
use crate::types::{GenerationParameters, OperationStatus};

/// Environment variable holding the generation service key.
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Serialize)]
struct PredictRequest<'a> {
    instances: Vec<Instance<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<GenerationParameters>,
}

#[derive(Serialize)]
struct Instance<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct PredictResponse {
    name: String,
}

/// Adapter for long-running generation operations.
///
/// `predict_long_running` submits a job and returns its operation name;
/// callers poll `operation_status` until `done` is set.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
}

impl GeminiClient {
    /// Create a client against a base URL such as
    /// `https://generativelanguage.googleapis.com/v1beta`.
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                ClientError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;
        let base_url = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn api_key(&self) -> ClientResult<String> {
        std::env::var(GEMINI_API_KEY_VAR).map_err(|_| {
            ClientError::Configuration(format!(
                "{} not configured. Set it to enable video generation.",
                GEMINI_API_KEY_VAR
            ))
        })
    }

    /// Submit a long-running generation job against a model.
    ///
    /// Returns the operation name to poll.
    pub async fn predict_long_running(
        &self,
        model: &str,
        prompt: &str,
        parameters: Option<GenerationParameters>,
    ) -> ClientResult<String> {
        let key = self.api_key()?;
        let url = format!(
            "{}/models/{}:predictLongRunning?key={}",
            self.base_url, model, key
        );
        let request = PredictRequest {
            instances: vec![Instance { prompt }],
            parameters,
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| send_error("Generation", e))?;
        let response = ensure_success(response, "Generation API").await?;

        let body: PredictResponse = decode_json(response, "Generation").await?;
        debug!(model, operation = %body.name, "Generation operation submitted");
        Ok(body.name)
    }

    /// Fetch the status of a long-running operation by its name.
    pub async fn operation_status(&self, operation_name: &str) -> ClientResult<OperationStatus> {
        let key = self.api_key()?;
        let url = format!("{}/{}?key={}", self.base_url, operation_name, key);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| send_error("Operation status", e))?;
        let response = ensure_success(response, "Operation status").await?;

        decode_json(response, "Operation status").await
    }
}
