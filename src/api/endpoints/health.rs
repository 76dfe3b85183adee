//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub facilities: usize,
    pub version: &'static str,
}

/// `GET /api/health` — liveness check for front-end clients.
pub async fn check(State(ctx): State<ApiContext>) -> Result<Json<HealthResponse>, ApiError> {
    let facilities = ctx.engine.directory.list()?.len();

    Ok(Json(HealthResponse {
        status: "ok",
        facilities,
        version: crate::config::APP_VERSION,
    }))
}
