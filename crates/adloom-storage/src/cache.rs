//! File-backed cache of processed videos.
//!
//! The cache is one JSON object keyed by video name. Every operation reads
//! the whole table, mutates it, and rewrites the file; there is no locking,
//! so concurrent writers race and the last write wins.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use adloom_models::CacheEntry;

use crate::error::StorageResult;

/// Default cache file name, relative to the working directory.
pub const DEFAULT_CACHE_FILE: &str = ".graphon_cache.json";

/// Handle to the cache file.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the whole cache table. A missing file is an empty table;
    /// an unreadable or corrupt file is an error.
    pub async fn entries(&self) -> StorageResult<HashMap<String, CacheEntry>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Look up one entry. Absence is "not cached", never an error.
    pub async fn read(&self, video_name: &str) -> StorageResult<Option<CacheEntry>> {
        let mut table = self.entries().await?;
        Ok(table.remove(video_name))
    }

    /// Insert or replace an entry, rewriting the whole file.
    pub async fn write(&self, video_name: &str, entry: &CacheEntry) -> StorageResult<()> {
        let mut table = self.entries().await?;
        table.insert(video_name.to_string(), entry.clone());
        self.persist(&table).await
    }

    /// Remove one entry. Returns whether it existed.
    pub async fn remove(&self, video_name: &str) -> StorageResult<bool> {
        let mut table = self.entries().await?;
        let existed = table.remove(video_name).is_some();
        if existed {
            self.persist(&table).await?;
        }
        Ok(existed)
    }

    /// Drop every entry by unlinking the backing file.
    pub async fn clear(&self) -> StorageResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Cache file removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, table: &HashMap<String, CacheEntry>) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(table)?;
        tokio::fs::write(&self.path, json).await?;
        debug!(
            path = %self.path.display(),
            entries = table.len(),
            "Cache file written"
        );
        Ok(())
    }
}
