//! Health check handler.

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Report gateway and backend health.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.backend.health().await {
        Ok(message) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "backend": { "status": "healthy", "message": message }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "backend": { "status": "unhealthy", "error": e.user_message() }
            })),
        ),
    }
}
