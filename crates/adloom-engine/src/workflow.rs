//! Cache-first video ingestion workflow.
//!
//! One run takes a video from local disk to a ready, queryable group:
//! check the cache, upload, wait for processing, create a group, wait for
//! the graph build, then record the result in the cache. A verified cache
//! hit jumps straight to ready.

use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use adloom_client::{GraphonClient, TransferClient};
use adloom_models::{CacheEntry, GraphStatus, IngestStage, JobId};
use adloom_storage::CacheStore;

use crate::error::{EngineError, EngineResult};
use crate::poll::{file_verdict, graph_verdict, poll_job, require_ready, PollConfig};
use crate::registry::JobRegistry;

/// Drives ingestion runs and records their progress in the job registry.
#[derive(Clone)]
pub struct VideoWorkflow {
    graphon: GraphonClient,
    transfer: TransferClient,
    cache: CacheStore,
    registry: JobRegistry,
    videos_dir: PathBuf,
    file_poll: PollConfig,
    graph_poll: PollConfig,
}

impl VideoWorkflow {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        graphon: GraphonClient,
        transfer: TransferClient,
        cache: CacheStore,
        registry: JobRegistry,
        videos_dir: PathBuf,
        file_poll: PollConfig,
        graph_poll: PollConfig,
    ) -> Self {
        Self {
            graphon,
            transfer,
            cache,
            registry,
            videos_dir,
            file_poll,
            graph_poll,
        }
    }

    /// Run the full ingestion for one video, recording progress in the
    /// registry. A terminal state is always written, success or failure.
    pub async fn run(&self, id: JobId, video_name: String) {
        info!(job_id = %id, video_name, "Ingestion started");
        match self.execute(&id, &video_name).await {
            Ok(group_id) => {
                info!(job_id = %id, video_name, group_id, "Ingestion complete");
                self.registry
                    .update(&id, |r| r.complete("Video ready for querying"))
                    .await;
            }
            Err(e) => {
                let message = e.to_string();
                error!(job_id = %id, video_name, error = %message, "Ingestion failed");
                self.registry.update(&id, |r| r.fail(message)).await;
            }
        }
    }

    async fn execute(&self, id: &JobId, video_name: &str) -> EngineResult<String> {
        self.registry
            .update(id, |r| r.advance(IngestStage::CheckingCache, "Checking cache"))
            .await;
        if let Some(entry) = self.cached_group(video_name).await {
            info!(video_name, group_id = %entry.group_id, "Cache hit, group ready");
            self.registry
                .update(id, |r| {
                    r.file_id = Some(entry.file_id.clone());
                    r.group_id = Some(entry.group_id.clone());
                })
                .await;
            return Ok(entry.group_id);
        }

        self.registry
            .update(id, |r| r.advance(IngestStage::Uploading, "Uploading video"))
            .await;
        let file_id = self.upload(video_name).await?;
        self.registry
            .update(id, |r| r.file_id = Some(file_id.clone()))
            .await;

        self.registry
            .update(id, |r| {
                r.advance(
                    IngestStage::WaitingForFileProcessing,
                    "Waiting for file processing",
                )
            })
            .await;
        self.wait_for_processing(&file_id).await?;

        self.registry
            .update(id, |r| r.advance(IngestStage::CreatingGroup, "Creating group"))
            .await;
        let group = self.graphon.create_group(&[file_id.clone()]).await?;
        let group_id = group.group_id.clone();
        self.registry
            .update(id, |r| r.group_id = Some(group_id.clone()))
            .await;

        // Some groups come back ready immediately; skip the build wait then.
        if group.graph_status != GraphStatus::Ready {
            self.registry
                .update(id, |r| {
                    r.advance(IngestStage::WaitingForGroupReady, "Waiting for group build")
                })
                .await;
            self.wait_for_group(&group_id).await?;
        }

        self.registry
            .update(id, |r| r.advance(IngestStage::WritingCache, "Writing cache entry"))
            .await;
        let entry = CacheEntry::new(file_id, group_id.clone());
        if let Err(e) = self.cache.write(video_name, &entry).await {
            warn!(video_name, error = %e, "Cache write failed, continuing");
        }

        Ok(group_id)
    }

    /// Look up a verified cache entry, demoting every failure to a miss.
    async fn cached_group(&self, video_name: &str) -> Option<CacheEntry> {
        let entry = match self.cache.read(video_name).await {
            Ok(Some(entry)) => entry,
            Ok(None) => return None,
            Err(e) => {
                warn!(video_name, error = %e, "Cache read failed, treating as miss");
                return None;
            }
        };

        match self.graphon.group_status(&entry.group_id).await {
            Ok(group) if group.graph_status == GraphStatus::Ready => Some(entry),
            Ok(group) => {
                info!(
                    video_name,
                    group_id = %entry.group_id,
                    status = %group.graph_status,
                    "Cached group not ready, re-ingesting"
                );
                None
            }
            Err(e) => {
                warn!(
                    video_name,
                    group_id = %entry.group_id,
                    error = %e,
                    "Cached group verification failed, re-ingesting"
                );
                None
            }
        }
    }

    /// Three-step upload: signed URL grant, byte transfer, processing
    /// trigger. Any failure abandons the whole upload. Returns the remote
    /// file id; processing completion is not awaited.
    pub async fn upload(&self, video_name: &str) -> EngineResult<String> {
        let path = self.videos_dir.join(video_name);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(EngineError::VideoNotFound(video_name.to_string()));
            }
            Err(e) => return Err(EngineError::Io(e)),
        };
        debug!(video_name, size = bytes.len(), "Read video from disk");

        let ticket = self.graphon.request_upload_url(video_name).await?;
        self.transfer.put_bytes(&ticket.upload_url, bytes).await?;
        self.graphon.trigger_processing(&ticket.file_id).await?;

        Ok(ticket.file_id)
    }

    async fn wait_for_processing(&self, file_id: &str) -> EngineResult<()> {
        let outcome = poll_job(
            &self.file_poll,
            || self.graphon.file_status(file_id),
            file_verdict,
        )
        .await?;
        require_ready(outcome, &self.file_poll.operation)?;
        Ok(())
    }

    async fn wait_for_group(&self, group_id: &str) -> EngineResult<()> {
        let outcome = poll_job(
            &self.graph_poll,
            || self.graphon.group_status(group_id),
            graph_verdict,
        )
        .await?;
        require_ready(outcome, &self.graph_poll.operation)?;
        Ok(())
    }
}
