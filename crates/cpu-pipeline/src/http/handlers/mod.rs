//! HTTP request handlers.

mod health;
mod pipelines;

pub use health::{health_check, metrics_handler, root};
pub use pipelines::{get_pipeline, start_pipeline};
