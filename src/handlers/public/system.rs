// handlers/public/system.rs - GET /, GET /health, and the route fallback

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "name": "Student Management API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health (public)",
            "auth": "/api/auth/register, /api/auth/login (public), /api/auth/me (protected)",
            "student": "/api/student[/:id] (protected)",
            "enrollment": "/api/enrollment[/:id] (protected)",
            "subject": "/api/subject[/:id] (protected)",
        }
    }))
}

/// Liveness plus a storage round trip; 503 while the store is unreachable.
pub async fn health(State(state): State<AppState>) -> Response {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok", "storage": "ok" }))).into_response(),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "storage": "unavailable" })),
            )
                .into_response()
        }
    }
}

pub async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
