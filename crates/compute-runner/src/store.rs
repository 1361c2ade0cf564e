//! In-memory job store.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::{info, warn};

use compute_core::{CoreError, Job, JobId, JobOutput, JobStatus, JobView};

use crate::pool::{HandleState, JobHandle};

/// A tracked job plus the handle to its computation.
struct JobEntry {
    job: Job,

    /// Released once the job reaches a terminal state.
    handle: Option<JobHandle<JobOutput>>,
}

impl JobEntry {
    /// Bring the job's status in line with its handle.
    fn reconcile(&mut self) {
        if self.job.is_terminal() {
            return;
        }
        let Some(handle) = self.handle.as_mut() else {
            return;
        };

        match handle.try_outcome() {
            HandleState::InFlight => {
                self.job.start();
            }
            HandleState::Finished(Ok(output)) => {
                info!(job_id = %self.job.id, result = output.result, "Job completed");
                self.job.complete(output);
                self.handle = None;
            }
            HandleState::Finished(Err(error)) => {
                warn!(job_id = %self.job.id, error = %error, "Job failed");
                self.job.fail(error);
                self.handle = None;
            }
        }
    }
}

/// Jobs indexed by id, bounded by a maximum job count.
///
/// Records are never evicted, so once `max_jobs` submissions have been
/// accepted every further submission is rejected.
pub struct JobStore {
    jobs: RwLock<HashMap<JobId, JobEntry>>,
    max_jobs: usize,
}

impl JobStore {
    /// Create an empty store that accepts at most `max_jobs` jobs.
    pub fn new(max_jobs: usize) -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
            max_jobs,
        }
    }

    /// Create a pending job and start its computation with `dispatch`.
    ///
    /// The capacity check, dispatch and insert happen under one write lock,
    /// so concurrent submissions cannot overshoot the limit. `dispatch` must
    /// not block.
    pub async fn submit<F>(&self, dispatch: F) -> Result<JobView, CoreError>
    where
        F: FnOnce() -> JobHandle<JobOutput>,
    {
        let mut jobs = self.jobs.write().await;
        if jobs.len() >= self.max_jobs {
            warn!(max_jobs = self.max_jobs, "Rejecting job: store at capacity");
            return Err(CoreError::CapacityExceeded { max: self.max_jobs });
        }

        let job = Job::new();
        let view = job.view();
        let entry = JobEntry {
            job,
            handle: Some(dispatch()),
        };
        jobs.insert(view.job_id.clone(), entry);

        info!(job_id = %view.job_id, tracked = jobs.len(), "Job submitted");
        Ok(view)
    }

    /// Look up a job, resolving its status first.
    ///
    /// This is not a pure read: if the computation has finished since the
    /// last poll, this call moves the job to `Completed` or `Failed` and
    /// records the result. A job still in flight moves to `Running`.
    pub async fn poll(&self, id: &JobId) -> Result<JobView, CoreError> {
        let mut jobs = self.jobs.write().await;
        let entry = jobs
            .get_mut(id)
            .ok_or_else(|| CoreError::JobNotFound(id.to_string()))?;

        entry.reconcile();
        Ok(entry.job.view())
    }

    /// Number of tracked jobs.
    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    /// Returns true if no jobs are tracked.
    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }

    /// Count jobs by their stored status, in lifecycle order.
    ///
    /// Reads the status as last resolved by a poll; it does not check
    /// handles.
    pub async fn status_counts(&self) -> [(JobStatus, u64); 4] {
        let jobs = self.jobs.read().await;

        let mut counts = JobStatus::ALL.map(|status| (status, 0u64));
        for entry in jobs.values() {
            if let Some((_, count)) = counts.iter_mut().find(|(s, _)| *s == entry.job.status) {
                *count += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{mpsc, Arc};
    use std::time::Duration;

    use compute_core::{run_task, JobResult};

    use super::*;
    use crate::pool::WorkerPool;

    async fn poll_until_terminal(store: &JobStore, id: &JobId) -> JobView {
        for _ in 0..500 {
            let view = store.poll(id).await.unwrap();
            if view.status.is_terminal() {
                return view;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("job {id} did not finish in time");
    }

    #[tokio::test]
    async fn test_submit_returns_pending() {
        let pool = WorkerPool::new(1).unwrap();
        let store = JobStore::new(10);

        let view = store.submit(|| pool.dispatch(|| run_task(10))).await.unwrap();
        assert_eq!(view.status, JobStatus::Pending);
        assert!(view.result.is_none());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_poll_unknown_is_not_found() {
        let store = JobStore::new(10);
        let err = store.poll(&JobId::from("missing".to_string())).await.unwrap_err();
        assert!(matches!(err, CoreError::JobNotFound(id) if id == "missing"));
    }

    #[tokio::test]
    async fn test_poll_resolves_and_stays_terminal() {
        let pool = WorkerPool::new(1).unwrap();
        let store = JobStore::new(10);

        let view = store.submit(|| pool.dispatch(|| run_task(10))).await.unwrap();
        let done = poll_until_terminal(&store, &view.job_id).await;

        assert_eq!(done.status, JobStatus::Completed);
        match &done.result {
            Some(JobResult::Output(output)) => {
                assert_eq!(output.result, 45);
                assert_eq!(output.iterations, 10);
            }
            other => panic!("unexpected result: {other:?}"),
        }

        for _ in 0..3 {
            assert_eq!(store.poll(&view.job_id).await.unwrap(), done);
        }
    }

    #[tokio::test]
    async fn test_running_while_in_flight() {
        let pool = WorkerPool::new(1).unwrap();
        let store = JobStore::new(10);
        let (release_tx, release_rx) = mpsc::channel::<()>();

        let view = store
            .submit(|| {
                pool.dispatch(move || {
                    release_rx.recv().ok();
                    run_task(10)
                })
            })
            .await
            .unwrap();

        let polled = store.poll(&view.job_id).await.unwrap();
        assert_eq!(polled.status, JobStatus::Running);
        assert!(polled.result.is_none());

        release_tx.send(()).unwrap();
        let done = poll_until_terminal(&store, &view.job_id).await;
        assert_eq!(done.status, JobStatus::Completed);
    }

    #[tokio::test]
    async fn test_failed_computation_records_error() {
        let pool = WorkerPool::new(1).unwrap();
        let store = JobStore::new(10);

        let view = store
            .submit(|| pool.dispatch(|| Err::<JobOutput, _>("input rejected")))
            .await
            .unwrap();
        let done = poll_until_terminal(&store, &view.job_id).await;

        assert_eq!(done.status, JobStatus::Failed);
        assert_eq!(
            done.result,
            Some(JobResult::Error {
                error: "input rejected".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_capacity_exceeded() {
        let pool = WorkerPool::new(1).unwrap();
        let store = JobStore::new(2);

        for _ in 0..2 {
            store.submit(|| pool.dispatch(|| run_task(1))).await.unwrap();
        }
        let err = store
            .submit(|| pool.dispatch(|| run_task(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::CapacityExceeded { max: 2 }));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_submits_respect_capacity() {
        let pool = Arc::new(WorkerPool::new(2).unwrap());
        let store = Arc::new(JobStore::new(10));

        let mut tasks = Vec::new();
        for _ in 0..50 {
            let pool = Arc::clone(&pool);
            let store = Arc::clone(&store);
            tasks.push(tokio::spawn(async move {
                store.submit(|| pool.dispatch(|| run_task(1))).await
            }));
        }

        let mut accepted = 0;
        let mut rejected = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => accepted += 1,
                Err(CoreError::CapacityExceeded { max: 10 }) => rejected += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(accepted, 10);
        assert_eq!(rejected, 40);
        assert_eq!(store.len().await, 10);
    }

    #[tokio::test]
    async fn test_status_counts_follow_polls() {
        let pool = WorkerPool::new(2).unwrap();
        let store = JobStore::new(10);

        let a = store.submit(|| pool.dispatch(|| run_task(5))).await.unwrap();
        store.submit(|| pool.dispatch(|| run_task(5))).await.unwrap();

        poll_until_terminal(&store, &a.job_id).await;

        let counts = store.status_counts().await;
        assert_eq!(counts[0], (JobStatus::Pending, 1));
        assert_eq!(counts[1], (JobStatus::Running, 0));
        assert_eq!(counts[2], (JobStatus::Completed, 1));
        assert_eq!(counts[3], (JobStatus::Failed, 0));
    }
}
