//! Shared application state.

use std::sync::Arc;

use compute_core::{run_task, CoreError, JobId, JobView, DEFAULT_ITERATIONS};

use crate::config::Config;
use crate::pool::{PoolError, WorkerPool};
use crate::store::JobStore;

/// Shared application state.
pub struct AppState {
    /// Pool running the compute tasks.
    pub pool: WorkerPool,

    /// Jobs indexed by JobId.
    pub jobs: JobStore,
}

impl AppState {
    /// Start the worker pool and create an empty store, wrapped in Arc.
    pub fn new(config: &Config) -> Result<Arc<Self>, PoolError> {
        let pool = WorkerPool::new(config.workers)?;
        let jobs = JobStore::new(config.max_jobs);
        Ok(Arc::new(Self { pool, jobs }))
    }

    /// Submit a compute job. `None` and `Some(0)` run the default
    /// iteration count.
    pub async fn submit_job(&self, iterations: Option<u64>) -> Result<JobView, CoreError> {
        let iterations = iterations
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_ITERATIONS);

        self.jobs
            .submit(|| self.pool.dispatch(move || run_task(iterations)))
            .await
    }

    /// Poll a job, resolving its status. See [`JobStore::poll`].
    pub async fn poll_job(&self, id: &JobId) -> Result<JobView, CoreError> {
        self.jobs.poll(id).await
    }
}
