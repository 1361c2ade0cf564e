//! Shared application state.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use compute_core::{run_step, CoreError, PipelineId, PipelineRun, DEFAULT_WORK_PER_STEP};

use crate::config::Config;
use crate::executor::{self, StepFn};
use crate::store::PipelineStore;

/// Shared application state.
pub struct AppState {
    /// Configuration the service started with.
    pub config: Config,

    /// Finished runs indexed by PipelineId.
    pub runs: PipelineStore,

    /// Work done by each pipeline step.
    step: StepFn,
}

impl AppState {
    /// Create a new AppState wrapped in Arc, running the placeholder step.
    pub fn new(config: Config) -> Arc<Self> {
        Self::with_step(config, run_step)
    }

    /// Create a new AppState whose pipelines run `step` at every position.
    pub fn with_step(config: Config, step: StepFn) -> Arc<Self> {
        Arc::new(Self {
            config,
            runs: PipelineStore::new(),
            step,
        })
    }

    /// Run a pipeline to completion and store the outcome.
    ///
    /// The step count is resolved with [`Config::effective_steps`];
    /// `work_per_step` of `None` or `Some(0)` uses the default work size.
    /// A failing step never surfaces as an error here: it is recorded on
    /// the returned run.
    pub async fn start_pipeline(&self, steps: Option<u64>, work_per_step: Option<u64>) -> PipelineRun {
        let steps = self.config.effective_steps(steps);
        let work = work_per_step
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_WORK_PER_STEP);
        let id = PipelineId::generate();
        let created_at = Utc::now();

        let run = match executor::execute(steps, work, self.step).await {
            Ok(results) => {
                info!(pipeline_id = %id, steps, work, "Pipeline completed");
                PipelineRun::completed(id, created_at, results)
            }
            Err(e) => {
                warn!(pipeline_id = %id, steps, work, error = %e, "Pipeline failed");
                PipelineRun::failed(id, created_at, e.to_string())
            }
        };

        self.runs.insert(run.clone()).await;
        run
    }

    /// Look up a finished run.
    pub async fn get_pipeline(&self, id: &PipelineId) -> Result<PipelineRun, CoreError> {
        self.runs.get(id).await
    }
}
