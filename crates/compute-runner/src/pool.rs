//! Fixed-size worker pool for CPU-bound jobs.
//!
//! Each dispatched task runs on one of the pool's threads and reports its
//! outcome through a oneshot channel. The receiving end is the task's
//! [`JobHandle`], which callers check without blocking.

use std::any::Any;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{debug, error};

/// Worker pool errors.
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("Worker pool needs at least one worker")]
    NoWorkers,

    #[error("Failed to start worker pool: {0}")]
    Build(#[from] rayon::ThreadPoolBuildError),
}

/// A fixed-size pool of compute threads.
///
/// The size is set at construction and never changes.
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    workers: usize,
}

impl WorkerPool {
    /// Start a pool with `workers` threads.
    pub fn new(workers: usize) -> Result<Self, PoolError> {
        if workers == 0 {
            return Err(PoolError::NoWorkers);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("compute-worker-{i}"))
            .panic_handler(|payload| {
                error!(panic = %panic_message(&*payload), "Worker thread panicked");
            })
            .build()?;

        Ok(Self { pool, workers })
    }

    /// Configured number of worker threads.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Queue `task` on the pool and return a handle to its outcome.
    ///
    /// Never blocks. Tasks start in submission order as threads free up but
    /// may finish in any order. A panicking task is reported as a failure.
    pub fn dispatch<T, E, F>(&self, task: F) -> JobHandle<T>
    where
        T: Send + 'static,
        E: Display,
        F: FnOnce() -> Result<T, E> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();

        self.pool.spawn_fifo(move || {
            let outcome = match panic::catch_unwind(AssertUnwindSafe(task)) {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(e)) => Err(e.to_string()),
                Err(payload) => Err(format!(
                    "Job panicked: {}",
                    panic_message(&*payload)
                )),
            };

            if tx.send(outcome).is_err() {
                debug!("Job handle dropped before the job finished");
            }
        });

        JobHandle { rx }
    }
}

/// Observed state of a dispatched task.
#[derive(Debug, PartialEq, Eq)]
pub enum HandleState<T> {
    /// Still queued or running.
    InFlight,
    /// Finished; the error string describes a failure.
    Finished(Result<T, String>),
}

/// Handle to a task running on the [`WorkerPool`].
#[derive(Debug)]
pub struct JobHandle<T> {
    rx: oneshot::Receiver<Result<T, String>>,
}

impl<T> JobHandle<T> {
    /// Check for the task's outcome without blocking.
    ///
    /// The outcome is handed out once; call again after `Finished` and the
    /// handle reports the task as lost.
    pub fn try_outcome(&mut self) -> HandleState<T> {
        match self.rx.try_recv() {
            Ok(outcome) => HandleState::Finished(outcome),
            Err(TryRecvError::Empty) => HandleState::InFlight,
            Err(TryRecvError::Closed) => HandleState::Finished(Err(
                "Worker exited without reporting a result".to_string(),
            )),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
