//! HTTP request handlers.

mod health;
mod jobs;

pub use health::{health_check, metrics_handler, root};
pub use jobs::{get_job, submit_job};
