//! HTTP adapters for the external video services.
//!
//! This crate provides:
//! - `GraphonClient`: video understanding (uploads, processing, groups, queries)
//! - `GeminiClient`: long-running video generation operations
//! - `TransferClient`: raw byte transfer to signed upload URLs
//!
//! Credentials are read from the environment at call time, so a missing key
//! fails the individual call rather than process startup.

pub mod error;
pub mod gemini;
pub mod graphon;
pub mod transfer;
pub mod types;

mod http;

pub use error::{ClientError, ClientResult};
pub use gemini::GeminiClient;
pub use graphon::GraphonClient;
pub use transfer::TransferClient;
pub use types::{
    CutDetectionResult, FileStatus, GenerationParameters, GroupStatus, OperationError,
    OperationStatus, QueryResponse, UploadTicket,
};
