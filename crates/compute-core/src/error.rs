//! Core domain errors.

use thiserror::Error;

/// Core domain errors for the compute templates.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Job not found.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// Pipeline run not found.
    #[error("Pipeline not found: {0}")]
    PipelineNotFound(String),

    /// The job store already tracks the maximum number of jobs.
    #[error("Max jobs reached ({max}); try again later")]
    CapacityExceeded { max: usize },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors raised by the placeholder workloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkloadError {
    /// The task accumulator no longer fits in a u64.
    #[error("Arithmetic overflow at iteration {iteration}")]
    TaskOverflow { iteration: u64 },

    /// A step accumulator no longer fits in a u64.
    #[error("Arithmetic overflow in step {step} at iteration {iteration}")]
    StepOverflow { step: u32, iteration: u64 },
}
