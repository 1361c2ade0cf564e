//! Compute Job types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{JobId, JobStatus};

/// Iteration count used when a submission does not name one.
pub const DEFAULT_ITERATIONS: u64 = 1_000_000;

/// Output of a successful compute task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOutput {
    /// The computed value.
    pub result: u64,

    /// Iterations the task ran.
    pub iterations: u64,

    /// When the computation finished.
    pub computed_at: DateTime<Utc>,
}

/// Result payload stored on a terminal Job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobResult {
    /// The task produced an output.
    Output(JobOutput),
    /// The task failed; `error` describes why.
    Error { error: String },
}

/// A Job tracked by the compute runner.
///
/// Transitions only move forward: `Pending -> Running -> Completed | Failed`,
/// or straight from `Pending` to a terminal state. Once terminal, the status
/// and result never change again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: JobId,

    /// Current job status.
    pub status: JobStatus,

    /// Result payload, set on the transition into a terminal state.
    pub result: Option<JobResult>,

    /// When the job was submitted.
    pub created_at: DateTime<Utc>,
}

impl Job {
    /// Create a new pending Job with a fresh id.
    pub fn new() -> Self {
        Self {
            id: JobId::generate(),
            status: JobStatus::Pending,
            result: None,
            created_at: Utc::now(),
        }
    }

    /// Mark the job as running. Returns false if the job is already past
    /// that point.
    pub fn start(&mut self) -> bool {
        if self.status != JobStatus::Pending {
            return false;
        }
        self.status = JobStatus::Running;
        true
    }

    /// Mark the job as completed with its output. No-op on terminal jobs.
    pub fn complete(&mut self, output: JobOutput) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.status = JobStatus::Completed;
        self.result = Some(JobResult::Output(output));
        true
    }

    /// Mark the job as failed. No-op on terminal jobs.
    pub fn fail(&mut self, error: impl Into<String>) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.status = JobStatus::Failed;
        self.result = Some(JobResult::Error {
            error: error.into(),
        });
        true
    }

    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// The client-facing view of this job.
    pub fn view(&self) -> JobView {
        JobView {
            job_id: self.id.clone(),
            status: self.status,
            result: self.result.clone(),
            created_at: self.created_at,
        }
    }
}

impl Default for Job {
    fn default() -> Self {
        Self::new()
    }
}

/// Public view of a Job, as returned by submit and poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobView {
    pub job_id: JobId,
    pub status: JobStatus,
    pub result: Option<JobResult>,
    pub created_at: DateTime<Utc>,
}
