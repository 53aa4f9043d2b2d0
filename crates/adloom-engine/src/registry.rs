//! In-memory job registry shared between handlers and background tasks.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use adloom_models::{JobId, JobRecord};

/// Shared map of job id to latest record.
///
/// Cheap to clone; every clone views the same state. Records live for the
/// process lifetime, matching the in-memory status model of the service.
#[derive(Debug, Clone, Default)]
pub struct JobRegistry {
    jobs: Arc<RwLock<HashMap<JobId, JobRecord>>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record, replacing any previous one with the same id.
    pub async fn insert(&self, record: JobRecord) {
        self.jobs.write().await.insert(record.id.clone(), record);
    }

    /// Snapshot of a single job.
    pub async fn get(&self, id: &JobId) -> Option<JobRecord> {
        self.jobs.read().await.get(id).cloned()
    }

    /// Apply a mutation to a job record, if it exists.
    pub async fn update<F>(&self, id: &JobId, mutate: F)
    where
        F: FnOnce(&mut JobRecord),
    {
        if let Some(record) = self.jobs.write().await.get_mut(id) {
            mutate(record);
        }
    }
}
