//! Client for the Graphon video understanding API.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use adloom_models::QueryOutcome;

use crate::error::{ClientError, ClientResult};
use crate::http::{decode_json, ensure_success, send_error};
use crate::types::{FileStatus, GroupStatus, QueryResponse, UploadTicket};

/// Environment variable holding the understanding service key.
pub const GRAPHON_API_KEY_VAR: &str = "GRAPHON_API_KEY";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Serialize)]
struct UploadUrlRequest<'a> {
    file_name: &'a str,
}

#[derive(Serialize)]
struct CreateGroupRequest<'a> {
    file_ids: &'a [String],
}

#[derive(Serialize)]
struct GroupQueryRequest<'a> {
    query: &'a str,
}

/// Adapter for uploads, processing, groups and queries.
///
/// The API key is read from the environment on every call, so a missing key
/// fails that call with a configuration error instead of failing startup.
#[derive(Debug, Clone)]
pub struct GraphonClient {
    http: Client,
    base_url: String,
}

impl GraphonClient {
    /// Create a client against a base URL such as `https://api.graphon.ai/v1`.
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
        std::env::var(GRAPHON_API_KEY_VAR).map_err(|_| {
            ClientError::Configuration(format!(
                "{} not configured. Get a key at https://graphon.ai and set it in your environment.",
                GRAPHON_API_KEY_VAR
            ))
        })
    }

    /// Request a signed upload URL and file id for a named video.
    pub async fn request_upload_url(&self, file_name: &str) -> ClientResult<UploadTicket> {
        let key = self.api_key()?;
        let url = format!("{}/files/upload-url", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&key)
            .json(&UploadUrlRequest { file_name })
            .send()
            .await
            .map_err(|e| send_error("Upload URL", e))?;
        let response = ensure_success(response, "Upload URL request").await?;

        let ticket: UploadTicket = decode_json(response, "Upload URL").await?;
        debug!(file_name, file_id = %ticket.file_id, "Received upload ticket");
        Ok(ticket)
    }

    /// Trigger server-side processing of an uploaded file.
    pub async fn trigger_processing(&self, file_id: &str) -> ClientResult<()> {
        let key = self.api_key()?;
        let url = format!("{}/files/{}/process", self.base_url, file_id);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&key)
            .send()
            .await
            .map_err(|e| send_error("Processing trigger", e))?;
        ensure_success(response, "Processing trigger").await?;

        debug!(file_id, "Processing triggered");
        Ok(())
    }

    /// Fetch the processing status of a file.
    pub async fn file_status(&self, file_id: &str) -> ClientResult<FileStatus> {
        let key = self.api_key()?;
        let url = format!("{}/files/{}", self.base_url, file_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&key)
            .send()
            .await
            .map_err(|e| send_error("File status", e))?;
        let response = ensure_success(response, "File status").await?;

        decode_json(response, "File status").await
    }

    /// Create a queryable group over processed files.
    pub async fn create_group(&self, file_ids: &[String]) -> ClientResult<GroupStatus> {
        let key = self.api_key()?;
        let url = format!("{}/groups", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&key)
            .json(&CreateGroupRequest { file_ids })
            .send()
            .await
            .map_err(|e| send_error("Group creation", e))?;
        let response = ensure_success(response, "Group creation").await?;

        let group: GroupStatus = decode_json(response, "Group creation").await?;
        info!(group_id = %group.group_id, status = %group.graph_status, "Group created");
        Ok(group)
    }

    /// Fetch the build status of a group.
    pub async fn group_status(&self, group_id: &str) -> ClientResult<GroupStatus> {
        let key = self.api_key()?;
        let url = format!("{}/groups/{}", self.base_url, group_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&key)
            .send()
            .await
            .map_err(|e| send_error("Group status", e))?;
        let response = ensure_success(response, "Group status").await?;

        decode_json(response, "Group status").await
    }

    /// Ask a question over a group, reshaping the raw answer into
    /// display-ready segments.
    pub async fn query_group(&self, group_id: &str, query: &str) -> ClientResult<QueryOutcome> {
        let key = self.api_key()?;
        let url = format!("{}/groups/{}/query", self.base_url, group_id);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&key)
            .json(&GroupQueryRequest { query })
            .send()
            .await
            .map_err(|e| send_error("Group query", e))?;
        let response = ensure_success(response, "Group query").await?;

        let raw: QueryResponse = decode_json(response, "Group query").await?;
        debug!(group_id, sources = raw.sources.len(), "Query answered");
        Ok(QueryOutcome::from_answer(query, raw.answer, &raw.sources))
    }
}
