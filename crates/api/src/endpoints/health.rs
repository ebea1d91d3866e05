//! Liveness endpoint.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::middleware::AppState;

/// Create health router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}
