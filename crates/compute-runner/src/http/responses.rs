//! HTTP request and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use compute_core::CoreError;

// ============================================================================
// Job types
// ============================================================================

/// Request body for the submit endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitJobRequest {
    /// Iterations to run; the default applies when absent or zero.
    #[serde(default)]
    pub iterations: Option<u64>,
}

// ============================================================================
// Service types
// ============================================================================

/// Response for the root endpoint.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub app: &'static str,
    pub version: &'static str,
    pub jobs: &'static str,
    pub health: &'static str,
    pub metrics: &'static str,
}

/// Response for the health endpoint.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub workers: usize,
}

// ============================================================================
// Error types
// ============================================================================

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
