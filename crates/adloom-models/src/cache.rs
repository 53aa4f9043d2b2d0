//! Cache entries for processed videos.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Remote identifiers recorded after a video has been fully processed.
///
/// Keyed by video name in the cache file. A valid entry lets repeat runs
/// skip the upload and group-build steps entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CacheEntry {
    /// File identifier returned by the upload flow.
    pub file_id: String,
    /// Group built over the file for querying.
    pub group_id: String,
    /// When the entry was written.
    pub created_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Create an entry stamped with the current time.
    pub fn new(file_id: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            group_id: group_id.into(),
            created_at: Utc::now(),
        }
    }
}
