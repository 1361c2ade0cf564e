//! Health, descriptor and metrics handlers.

use std::sync::Arc;

use axum::{extract::State, http::header, response::IntoResponse, Json};

use crate::http::responses::{HealthResponse, ServiceInfo};
use crate::state::AppState;

/// Static service descriptor.
pub async fn root() -> impl IntoResponse {
    Json(ServiceInfo {
        app: "Batch Compute Runner",
        version: env!("CARGO_PKG_VERSION"),
        jobs: "/jobs",
        health: "/health",
        metrics: "/metrics",
    })
}

/// Health check endpoint.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        workers: state.pool.workers(),
    })
}

/// Prometheus metrics endpoint.
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let body = crate::metrics::collect_metrics(&state).await;
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}
