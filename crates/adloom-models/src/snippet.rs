//! Cut-detection snippet records.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One contiguous shot between two detected cuts.
///
/// Produced by the detect-cuts stage and branded one at a time by the
/// pipeline, in `snippet_number` order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Snippet {
    pub snippet_number: u32,
    /// Output filename, `{index:04}_{start}_{end}.mp4`.
    pub filename: String,
    pub start_frame: u64,
    pub end_frame: u64,
    /// Start time in seconds.
    pub start_time: f64,
    /// End time in seconds.
    pub end_time: f64,
}

impl Snippet {
    /// Standard snippet filename for an index and time range.
    pub fn filename_for(index: u32, start: f64, end: f64) -> String {
        format!("{:04}_{}_{}.mp4", index, start, end)
    }
}
