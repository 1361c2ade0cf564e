//! Job submission and polling handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use compute_core::JobId;

use crate::http::responses::{error_response, SubmitJobRequest};
use crate::state::AppState;

/// Submit a job. Returns as soon as the job is queued.
pub async fn submit_job(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitJobRequest>,
) -> impl IntoResponse {
    match state.submit_job(req.iterations).await {
        Ok(view) => Json(view).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Poll a job. May move the job to a later status; see `JobStore::poll`.
pub async fn get_job(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<String>,
) -> impl IntoResponse {
    match state.poll_job(&JobId::from(job_id)).await {
        Ok(view) => Json(view).into_response(),
        Err(e) => error_response(&e),
    }
}
