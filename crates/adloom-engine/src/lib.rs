//! Orchestration for video ingestion and branded generation.
//!
//! This crate provides:
//! - `poll`: fixed-interval polling of asynchronous remote jobs
//! - `registry`: shared in-memory job records
//! - `workflow`: cache-first video ingestion (upload, process, group, cache)
//! - `pipeline`: sequential cut detection, branding and merge

pub mod error;
pub mod pipeline;
pub mod poll;
pub mod registry;
pub mod workflow;

pub use error::{EngineError, EngineResult};
pub use pipeline::BrandingPipeline;
pub use poll::{
    file_verdict, graph_verdict, operation_verdict, poll_job, JobVerdict, PollConfig, PollOutcome,
};
pub use registry::JobRegistry;
pub use workflow::VideoWorkflow;
