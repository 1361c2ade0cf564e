//! Prometheus metrics collection and formatting.

use std::fmt::Write;

use crate::state::AppState;

/// Collect all metrics from AppState and format as Prometheus text.
pub async fn collect_metrics(state: &AppState) -> String {
    let counts = state.runs.counts().await;
    let mut output = String::new();

    write_gauge(&mut output, "pipeline_runs_total", "Total pipeline runs", counts.total);
    write_gauge(
        &mut output,
        "pipeline_runs_completed",
        "Completed pipeline runs",
        counts.completed,
    );
    write_gauge(&mut output, "pipeline_runs_failed", "Failed pipeline runs", counts.failed);
    write_gauge(
        &mut output,
        "pipeline_max_steps_config",
        "Configured maximum steps per run",
        u64::from(state.config.max_steps),
    );

    output
}

fn write_gauge(output: &mut String, name: &str, help: &str, value: u64) {
    writeln!(output, "# HELP {name} {help}").ok();
    writeln!(output, "# TYPE {name} gauge").ok();
    writeln!(output, "{name} {value}").ok();
}
