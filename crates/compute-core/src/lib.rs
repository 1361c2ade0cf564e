//! Compute Templates Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - Network/HTTP
//! - Worker pools or async runtimes
//!
//! The placeholder workloads live here too. They are the part adopters are
//! expected to replace with their own CPU-bound logic.

pub mod error;
pub mod ids;
pub mod job;
pub mod pipeline;
pub mod status;
pub mod workload;

// Re-export commonly used types
pub use error::{CoreError, WorkloadError};
pub use ids::{JobId, PipelineId};
pub use job::{Job, JobOutput, JobResult, JobView, DEFAULT_ITERATIONS};
pub use pipeline::{PipelineRun, StepInput, StepResult, DEFAULT_WORK_PER_STEP};
pub use status::{JobStatus, PipelineStatus};
pub use workload::{run_pipeline, run_pipeline_with, run_step, run_task};
