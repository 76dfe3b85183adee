//! Facility administration endpoints (admin UI).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::facility::NewFacility;
use crate::models::Facility;

/// `GET /api/facilities`
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Facility>>, ApiError> {
    Ok(Json(ctx.engine.directory.list()?))
}

/// `POST /api/facilities`
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(record): Json<NewFacility>,
) -> Result<(StatusCode, Json<Facility>), ApiError> {
    let facility = ctx.engine.directory.add(record)?;
    Ok((StatusCode::CREATED, Json(facility)))
}

/// `GET /api/facilities/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Facility>, ApiError> {
    ctx.engine
        .directory
        .get(id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("facility {id}")))
}

/// `PUT /api/facilities/:id`
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
    Json(record): Json<NewFacility>,
) -> Result<Json<Facility>, ApiError> {
    Ok(Json(ctx.engine.directory.update(id, record)?))
}

/// `DELETE /api/facilities/:id`
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ctx.engine.directory.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct UtilizationResponse {
    pub facility_id: Uuid,
    pub active_tickets: usize,
    /// `None` when the facility has no emergency beds — utilization is
    /// undefined, not zero.
    pub utilization_pct: Option<f64>,
}

/// `GET /api/facilities/:id/utilization`
pub async fn utilization(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<UtilizationResponse>, ApiError> {
    let active_tickets = ctx.engine.tickets.active_count_for_facility(id)?;
    let utilization_pct = ctx.engine.directory.utilization(id, active_tickets)?;

    Ok(Json(UtilizationResponse {
        facility_id: id,
        active_tickets,
        utilization_pct,
    }))
}
