//! Shared data models for the Adloom backend.
//!
//! This crate provides:
//! - Cache entries for processed videos
//! - Remote status enums for file processing and graph builds
//! - Job records for background-run progress polling
//! - Query result shaping (answers and time-coded segments)
//! - Placement and snippet records for the branding pipeline
//! - Timestamp display helpers

pub mod cache;
pub mod job;
pub mod placement;
pub mod segment;
pub mod snippet;
pub mod status;
pub mod timestamp;

pub use cache::CacheEntry;
pub use job::{IngestStage, JobId, JobRecord, JobState};
pub use placement::Placement;
pub use segment::{QueryOutcome, SourceNode, VideoSegment};
pub use snippet::Snippet;
pub use status::{GraphStatus, ProcessingStatus};
pub use timestamp::{mmss_to_seconds, seconds_to_mmss, TimestampError};
