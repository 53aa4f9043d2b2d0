//! Sequential branding pipeline: cut detection, per-snippet branding, merge.
//!
//! Every stage is a long-running generation operation, submitted and then
//! polled to a terminal state before the next stage starts. A failure at
//! any point halts the pipeline; later stages are never submitted.

use tracing::{error, info};

use adloom_client::{CutDetectionResult, GeminiClient, OperationStatus};
use adloom_models::{JobId, Placement, Snippet};

use crate::error::{EngineError, EngineResult};
use crate::poll::{operation_verdict, poll_job, require_ready, PollConfig};
use crate::registry::JobRegistry;

/// Drives branded-video generation and records progress in the registry.
#[derive(Clone)]
pub struct BrandingPipeline {
    gemini: GeminiClient,
    registry: JobRegistry,
    op_poll: PollConfig,
    cuts_model: String,
    branding_model: String,
    merge_model: String,
}

impl BrandingPipeline {
    pub fn new(
        gemini: GeminiClient,
        registry: JobRegistry,
        op_poll: PollConfig,
        cuts_model: impl Into<String>,
        branding_model: impl Into<String>,
        merge_model: impl Into<String>,
    ) -> Self {
        Self {
            gemini,
            registry,
            op_poll,
            cuts_model: cuts_model.into(),
            branding_model: branding_model.into(),
            merge_model: merge_model.into(),
        }
    }

    /// Run the full pipeline for one video, recording progress in the
    /// registry. A terminal state is always written, success or failure.
    pub async fn run(&self, id: JobId, video_name: String, placements: Vec<Placement>) {
        info!(
            job_id = %id,
            video_name,
            placements = placements.len(),
            "Branding pipeline started"
        );
        match self.execute(&id, &video_name, &placements).await {
            Ok(()) => {
                info!(job_id = %id, video_name, "Branding pipeline complete");
                self.registry
                    .update(&id, |r| r.complete("Branded video ready"))
                    .await;
            }
            Err(e) => {
                let message = e.to_string();
                error!(job_id = %id, video_name, error = %message, "Branding pipeline failed");
                self.registry.update(&id, |r| r.fail(message)).await;
            }
        }
    }

    async fn execute(
        &self,
        id: &JobId,
        video_name: &str,
        placements: &[Placement],
    ) -> EngineResult<()> {
        self.registry
            .update(id, |r| r.update_step("detecting_cuts", 10, "Detecting scene cuts"))
            .await;
        let prompt = cut_detection_prompt(video_name, placements);
        let name = self
            .gemini
            .predict_long_running(&self.cuts_model, &prompt, None)
            .await?;
        let status = self.wait(&name).await?;
        let cuts = parse_cut_result(status)?;
        info!(job_id = %id, snippets = cuts.snippets.len(), "Cut detection complete");

        let total = cuts.snippets.len();
        for (i, snippet) in cuts.snippets.iter().enumerate() {
            let progress = (20 + i * 70 / total.max(1)) as u8;
            let message = format!("Branding snippet {} of {}", i + 1, total);
            self.registry
                .update(id, |r| r.update_step("branding", progress, message))
                .await;

            let prompt = branding_prompt(snippet, placements);
            let name = self
                .gemini
                .predict_long_running(&self.branding_model, &prompt, None)
                .await?;
            self.wait(&name).await?;
        }

        self.registry
            .update(id, |r| r.update_step("merging", 90, "Merging branded snippets"))
            .await;
        let prompt = merge_prompt(video_name, total);
        let name = self
            .gemini
            .predict_long_running(&self.merge_model, &prompt, None)
            .await?;
        self.wait(&name).await?;

        Ok(())
    }

    /// Poll one operation to a terminal state.
    async fn wait(&self, operation_name: &str) -> EngineResult<OperationStatus> {
        let outcome = poll_job(
            &self.op_poll,
            || self.gemini.operation_status(operation_name),
            operation_verdict,
        )
        .await?;
        require_ready(outcome, &self.op_poll.operation)
    }
}

fn parse_cut_result(status: OperationStatus) -> EngineResult<CutDetectionResult> {
    let payload = status.response.ok_or_else(|| {
        EngineError::JobFailed("Cut detection finished without a result payload".to_string())
    })?;
    serde_json::from_value(payload)
        .map_err(|e| EngineError::JobFailed(format!("Cut detection payload did not parse: {}", e)))
}

/// Render the requested placements as one prompt clause.
fn placement_clause(placements: &[Placement]) -> String {
    placements
        .iter()
        .map(|p| match (p.start_seconds, p.end_seconds) {
            (Some(start), Some(end)) => {
                format!("{} on {} between {}s and {}s", p.brand, p.character, start, end)
            }
            _ => format!("{} on {}", p.brand, p.character),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn cut_detection_prompt(video_name: &str, placements: &[Placement]) -> String {
    let mut prompt = format!(
        "Detect scene cuts in '{}' and return a JSON object with a 'snippets' array. \
         Each snippet carries snippet_number, filename, start_frame, end_frame, \
         start_time and end_time.",
        video_name
    );
    if !placements.is_empty() {
        prompt.push_str(&format!(
            " Favor cut points that leave room for placing {}.",
            placement_clause(placements)
        ));
    }
    prompt
}

fn branding_prompt(snippet: &Snippet, placements: &[Placement]) -> String {
    let mut prompt = format!(
        "Brand snippet '{}' covering {}s to {}s.",
        snippet.filename, snippet.start_time, snippet.end_time
    );
    if placements.is_empty() {
        prompt.push_str(" Keep the footage unchanged apart from light cleanup.");
    } else {
        prompt.push_str(&format!(
            " Insert {}. Keep each placement natural and consistent across frames.",
            placement_clause(placements)
        ));
    }
    prompt
}

fn merge_prompt(video_name: &str, snippet_count: usize) -> String {
    format!(
        "Merge {} branded snippets of '{}' back into a single video in the original order.",
        snippet_count, video_name
    )
}
