//! HTTP request and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use compute_core::CoreError;

/// Request body for starting a pipeline.
#[derive(Debug, Default, Deserialize)]
pub struct StartPipelineRequest {
    /// Steps to run; clamped to the configured maximum.
    #[serde(default)]
    pub steps: Option<u64>,

    /// Work size for every step.
    #[serde(default)]
    pub work_per_step: Option<u64>,
}

/// Response for the root endpoint.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub app: &'static str,
    pub version: &'static str,
    pub pipelines: &'static str,
    pub health: &'static str,
    pub metrics: &'static str,
}

/// Response for the health endpoint.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub max_steps: u32,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map a core error to its HTTP response.
pub fn error_response(err: &CoreError) -> Response {
    let status = match err {
        CoreError::JobNotFound(_) | CoreError::PipelineNotFound(_) => StatusCode::NOT_FOUND,
        CoreError::CapacityExceeded { .. } => StatusCode::SERVICE_UNAVAILABLE,
        CoreError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}
