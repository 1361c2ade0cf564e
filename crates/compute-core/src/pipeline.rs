//! Pipeline run and step types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{PipelineId, PipelineStatus};

/// Work size used when a submission does not name one.
pub const DEFAULT_WORK_PER_STEP: u64 = 100_000;

/// Input handed to a single pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepInput {
    /// Configured work size for every step.
    pub work: u64,

    /// Full output of the previous step; `None` for step 0.
    pub prev: Option<StepResult>,
}

impl StepInput {
    /// Input for the first step.
    pub fn initial(work: u64) -> Self {
        Self { work, prev: None }
    }

    /// Input for the step following `prev`.
    pub fn after(work: u64, prev: StepResult) -> Self {
        Self {
            work,
            prev: Some(prev),
        }
    }
}

/// Output of one pipeline step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    /// Zero-based position in the pipeline.
    pub step: u32,

    /// Value produced by the step.
    pub output: u64,

    /// When the step finished.
    pub at: DateTime<Utc>,
}

/// A finished pipeline run.
///
/// Exactly one of `result` and `error` is set, matching `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineRun {
    /// Unique run identifier.
    #[serde(rename = "pipeline_id")]
    pub id: PipelineId,

    /// Final status.
    pub status: PipelineStatus,

    /// Every step output, in step order. Set iff completed.
    pub result: Option<Vec<StepResult>>,

    /// Failure description. Set iff failed.
    pub error: Option<String>,

    /// When the submission began.
    pub created_at: DateTime<Utc>,
}

impl PipelineRun {
    /// A run where every step succeeded.
    pub fn completed(id: PipelineId, created_at: DateTime<Utc>, steps: Vec<StepResult>) -> Self {
        Self {
            id,
            status: PipelineStatus::Completed,
            result: Some(steps),
            error: None,
            created_at,
        }
    }

    /// A run aborted by a failing step. Partial results are discarded.
    pub fn failed(id: PipelineId, created_at: DateTime<Utc>, error: impl Into<String>) -> Self {
        Self {
            id,
            status: PipelineStatus::Failed,
            result: None,
            error: Some(error.into()),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_run_shape() {
        let step = StepResult {
            step: 0,
            output: 15,
            at: Utc::now(),
        };
        let run = PipelineRun::completed(PipelineId::generate(), Utc::now(), vec![step]);
        let json = serde_json::to_value(&run).unwrap();

        assert_eq!(json["status"], "completed");
        assert!(json["pipeline_id"].is_string());
        assert!(json["error"].is_null());
        assert_eq!(json["result"][0]["step"], 0);
        assert_eq!(json["result"][0]["output"], 15);
        assert!(json["result"][0]["at"].is_string());
    }

    #[test]
    fn test_failed_run_has_no_result() {
        let run = PipelineRun::failed(PipelineId::from("p-1".to_string()), Utc::now(), "boom");
        assert_eq!(run.status, PipelineStatus::Failed);
        assert!(run.result.is_none());
        assert_eq!(run.error.as_deref(), Some("boom"));
    }
}
