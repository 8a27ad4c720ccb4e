use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::api::format::now_display;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/v1/health - liveness probe, returned without the envelope
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "pest detection server is running",
        "time": now_display(),
        "storage": if state.has_storage() { "available" } else { "unavailable" },
    }))
}

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Pest Detection API",
        "version": version,
        "description": "Audio-based pest detection platform backend",
        "endpoints": {
            "health": "GET /api/v1/health",
            "auth": "POST /api/v1/auth/login, POST /api/v1/auth/register, GET /api/v1/auth/verify",
            "detection": "POST /api/v1/detection/upload, GET /api/v1/detection/result/:id, GET /api/v1/detection/status/:id",
            "jobs": "POST|GET /api/v1/jobs, GET|DELETE /api/v1/jobs/:id, POST /api/v1/jobs/:id/complete",
            "device": "GET /api/v1/device/list, GET /api/v1/device/:id, POST /api/v1/device/register",
        }
    }))
}

/// Fallback for unmatched routes
pub async fn not_found() -> ApiError {
    ApiError::not_found("resource not found")
}
