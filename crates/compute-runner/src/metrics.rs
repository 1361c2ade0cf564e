//! Prometheus metrics collection and formatting.
//!
//! This module provides metrics in Prometheus text exposition format.

use std::fmt::Write;

use crate::state::AppState;

/// Collect all metrics from AppState and format as Prometheus text.
pub async fn collect_metrics(state: &AppState) -> String {
    let mut output = String::new();

    collect_job_metrics(state, &mut output).await;
    collect_config_metrics(state, &mut output);

    output
}

/// Collect job counts by status.
async fn collect_job_metrics(state: &AppState, output: &mut String) {
    let counts = state.jobs.status_counts().await;

    writeln!(output, "# HELP compute_jobs_total Total jobs by status").ok();
    writeln!(output, "# TYPE compute_jobs_total gauge").ok();
    for (status, count) in counts {
        writeln!(output, "compute_jobs_total{{status=\"{status}\"}} {count}").ok();
    }
}

/// Collect static configuration gauges.
fn collect_config_metrics(state: &AppState, output: &mut String) {
    writeln!(
        output,
        "# HELP compute_workers_config Configured worker pool size"
    )
    .ok();
    writeln!(output, "# TYPE compute_workers_config gauge").ok();
    writeln!(output, "compute_workers_config {}", state.pool.workers()).ok();
}
