//! Health check handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub backend: BackendHealth,
}

/// Backend health with optional error message.
#[derive(Debug, Serialize)]
pub struct BackendHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Health check endpoint - verifies backend connectivity.
pub async fn health_check(State(state): State<AppState>) -> Response {
    let backend = match state.backend.health().await {
        Ok(message) => BackendHealth {
            status: "healthy".to_string(),
            message: Some(message),
            error: None,
        },
        Err(e) => BackendHealth {
            status: "unhealthy".to_string(),
            message: None,
            error: Some(e.user_message()),
        },
    };

    let healthy = backend.status == "healthy";
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        backend,
    };

    if healthy {
        (StatusCode::OK, Json(response)).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
    }
}
