//! Wire types shared by the service adapters.

use serde::{Deserialize, Serialize};

use adloom_models::{GraphStatus, ProcessingStatus, Snippet, SourceNode};

/// Signed upload grant for a single file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadTicket {
    pub file_id: String,
    pub upload_url: String,
}

/// Processing state of an uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileStatus {
    #[serde(default)]
    pub file_id: String,
    pub processing_status: ProcessingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Identity and build state of a query group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupStatus {
    pub group_id: String,
    pub graph_status: GraphStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Raw answer from the understanding service, before reshaping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<SourceNode>,
}

/// Optional tuning knobs for a generation request.
///
/// Serialized in the camelCase form the generation API expects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationParameters {
    #[serde(rename = "durationSeconds", skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    #[serde(rename = "aspectRatio", skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
}

/// Status of a long-running generation operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationStatus {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<serde_json::Value>,
}

/// Failure detail attached to a finished operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationError {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

/// Payload of a completed cut-detection operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutDetectionResult {
    #[serde(default)]
    pub snippets: Vec<Snippet>,
}
