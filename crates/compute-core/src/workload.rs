//! Placeholder CPU-bound workloads.
//!
//! Replace these with your own logic. They must stay free of I/O and shared
//! state: the compute runner calls [`run_task`] on a pool thread and the
//! pipeline service calls [`run_step`] once per step.

use chrono::Utc;

use crate::{JobOutput, StepInput, StepResult, WorkloadError};

/// Simulated computation: the sum of `i % 37` for `i` in `0..iterations`.
pub fn run_task(iterations: u64) -> Result<JobOutput, WorkloadError> {
    let mut total: u64 = 0;
    for i in 0..iterations {
        total = total
            .checked_add(i % 37)
            .ok_or(WorkloadError::TaskOverflow { iteration: i })?;
    }

    Ok(JobOutput {
        result: total,
        iterations,
        computed_at: Utc::now(),
    })
}

/// Simulated pipeline step: the sum of `(step + 1) * (i % 31)` for `i` in
/// `0..input.work`.
///
/// `input.prev` carries the previous step's output for steps that need it;
/// this placeholder only uses the work size.
pub fn run_step(step: u32, input: &StepInput) -> Result<StepResult, WorkloadError> {
    let factor = u64::from(step) + 1;
    let mut acc: u64 = 0;
    for i in 0..input.work {
        acc = factor
            .checked_mul(i % 31)
            .and_then(|v| acc.checked_add(v))
            .ok_or(WorkloadError::StepOverflow { step, iteration: i })?;
    }

    Ok(StepResult {
        step,
        output: acc,
        at: Utc::now(),
    })
}

/// Run `steps` placeholder steps in order. See [`run_pipeline_with`].
pub fn run_pipeline(steps: u32, work_per_step: u64) -> Result<Vec<StepResult>, WorkloadError> {
    run_pipeline_with(steps, work_per_step, run_step)
}

/// Run `steps` calls of `step` in order, feeding each one the previous
/// step's output.
///
/// Stops at the first failing step; later steps never run and no partial
/// results are returned.
pub fn run_pipeline_with<F>(
    steps: u32,
    work_per_step: u64,
    mut step: F,
) -> Result<Vec<StepResult>, WorkloadError>
where
    F: FnMut(u32, &StepInput) -> Result<StepResult, WorkloadError>,
{
    let mut results = Vec::with_capacity(steps as usize);
    let mut input = StepInput::initial(work_per_step);

    for index in 0..steps {
        let output = step(index, &input)?;
        results.push(output.clone());
        input = StepInput::after(work_per_step, output);
    }

    Ok(results)
}
