//! In-memory pipeline run store.

use std::collections::HashMap;

use tokio::sync::RwLock;

use compute_core::{CoreError, PipelineId, PipelineRun, PipelineStatus};

/// Point-in-time run counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounts {
    pub total: u64,
    pub completed: u64,
    pub failed: u64,
}

/// Finished pipeline runs indexed by id. Unbounded; nothing is evicted.
#[derive(Default)]
pub struct PipelineStore {
    runs: RwLock<HashMap<PipelineId, PipelineRun>>,
}

impl PipelineStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a finished run.
    pub async fn insert(&self, run: PipelineRun) {
        self.runs.write().await.insert(run.id.clone(), run);
    }

    /// Look up a run.
    pub async fn get(&self, id: &PipelineId) -> Result<PipelineRun, CoreError> {
        self.runs
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::PipelineNotFound(id.to_string()))
    }

    /// Count runs by status.
    pub async fn counts(&self) -> RunCounts {
        let runs = self.runs.read().await;

        let mut counts = RunCounts {
            total: runs.len() as u64,
            ..RunCounts::default()
        };
        for run in runs.values() {
            match run.status {
                PipelineStatus::Completed => counts.completed += 1,
                PipelineStatus::Failed => counts.failed += 1,
            }
        }
        counts
    }
}
