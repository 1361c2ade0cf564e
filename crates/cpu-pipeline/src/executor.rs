//! Pipeline executor.
//!
//! Steps run one after another on a single blocking thread. The caller
//! awaits the whole pipeline, so a submission returns only once every step
//! has finished or one has failed.

use thiserror::Error;
use tracing::debug;

use compute_core::{run_pipeline_with, StepInput, StepResult, WorkloadError};

/// A single pipeline step: takes its index and input, returns its output.
pub type StepFn = fn(u32, &StepInput) -> Result<StepResult, WorkloadError>;

/// Reasons a pipeline run can fail.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// A step returned an error.
    #[error(transparent)]
    Step(#[from] WorkloadError),

    /// The blocking task panicked or was cancelled.
    #[error("Pipeline aborted: {0}")]
    Aborted(String),
}

/// Run `steps` sequential calls of `step` with `work_per_step` each.
///
/// Runs on the runtime's blocking pool so the HTTP reactor stays free.
/// Steps never overlap; parallel or background execution is left to
/// adopters.
pub async fn execute(
    steps: u32,
    work_per_step: u64,
    step: StepFn,
) -> Result<Vec<StepResult>, ExecutorError> {
    debug!(steps, work_per_step, "Executing pipeline");

    let results =
        tokio::task::spawn_blocking(move || run_pipeline_with(steps, work_per_step, step))
            .await
            .map_err(|e| ExecutorError::Aborted(e.to_string()))??;

    Ok(results)
}

#[cfg(test)]
mod tests {
    use compute_core::run_step;

    use super::*;

    fn fail_second_step(step: u32, input: &StepInput) -> Result<StepResult, WorkloadError> {
        if step == 1 {
            return Err(WorkloadError::StepOverflow { step, iteration: 0 });
        }
        run_step(step, input)
    }

    fn panic_in_step(_: u32, _: &StepInput) -> Result<StepResult, WorkloadError> {
        panic!("step blew up")
    }

    #[tokio::test]
    async fn test_execute_runs_all_steps_in_order() {
        let results = execute(3, 10, run_step).await.unwrap();

        let steps: Vec<u32> = results.iter().map(|r| r.step).collect();
        assert_eq!(steps, vec![0, 1, 2]);

        let outputs: Vec<u64> = results.iter().map(|r| r.output).collect();
        assert_eq!(outputs, vec![45, 90, 135]);
    }

    #[tokio::test]
    async fn test_execute_is_deterministic() {
        let a = execute(4, 1_000, run_step).await.unwrap();
        let b = execute(4, 1_000, run_step).await.unwrap();

        let outputs = |rs: &[StepResult]| rs.iter().map(|r| r.output).collect::<Vec<_>>();
        assert_eq!(outputs(&a), outputs(&b));
    }

    #[tokio::test]
    async fn test_step_error_fails_the_run() {
        let err = execute(3, 10, fail_second_step).await.unwrap_err();
        assert!(matches!(
            err,
            ExecutorError::Step(WorkloadError::StepOverflow { step: 1, .. })
        ));
    }

    #[tokio::test]
    async fn test_step_panic_is_reported() {
        let err = execute(2, 10, panic_in_step).await.unwrap_err();
        assert!(matches!(err, ExecutorError::Aborted(_)));
    }
}
