//! Local JSON cache store.
//!
//! This crate provides:
//! - A file-backed table of processed videos (video name -> remote ids)
//! - Whole-file read-modify-write persistence, last writer wins
//! - Explicit reset (single entry or the whole table)

pub mod cache;
pub mod error;

pub use cache::{CacheStore, DEFAULT_CACHE_FILE};
pub use error::{StorageError, StorageResult};
