//! Pipeline run handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use compute_core::PipelineId;

use crate::http::responses::{error_response, StartPipelineRequest};
use crate::state::AppState;

/// Run a pipeline. Responds once every step has finished or one has failed.
pub async fn start_pipeline(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StartPipelineRequest>,
) -> impl IntoResponse {
    let run = state.start_pipeline(req.steps, req.work_per_step).await;
    Json(run)
}

/// Fetch a finished pipeline run.
pub async fn get_pipeline(
    State(state): State<Arc<AppState>>,
    Path(pipeline_id): Path<String>,
) -> impl IntoResponse {
    match state.get_pipeline(&PipelineId::from(pipeline_id)).await {
        Ok(run) => Json(run).into_response(),
        Err(e) => error_response(&e),
    }
}
