//! Ticket intake and staff action endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{Ticket, TicketStatus};
use crate::tickets::TicketIntake;

/// `POST /api/tickets` — intake. Always succeeds for valid input, even
/// when no facility is in range (the ticket stays open, unassigned).
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(intake): Json<TicketIntake>,
) -> Result<(StatusCode, Json<Ticket>), ApiError> {
    let ticket = ctx.engine.tickets.create_ticket(intake)?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// `GET /api/tickets`
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Ticket>>, ApiError> {
    Ok(Json(ctx.engine.tickets.list()?))
}

/// `GET /api/tickets/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ticket>, ApiError> {
    ctx.engine
        .tickets
        .get(id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("ticket {id}")))
}

#[derive(Deserialize)]
pub struct StatusUpdate {
    pub status: TicketStatus,
}

/// `POST /api/tickets/:id/status` — staff status action.
pub async fn update_status(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<Ticket>, ApiError> {
    Ok(Json(ctx.engine.tickets.update_status(id, update.status)?))
}

#[derive(Deserialize)]
pub struct Reassignment {
    pub facility_id: Uuid,
}

/// `POST /api/tickets/:id/reassign` — explicit staff override.
pub async fn reassign(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
    Json(reassignment): Json<Reassignment>,
) -> Result<Json<Ticket>, ApiError> {
    Ok(Json(
        ctx.engine.tickets.reassign(id, reassignment.facility_id)?,
    ))
}

/// `GET /api/facilities/:id/tickets` — a facility's staff screen.
pub async fn for_facility(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Ticket>>, ApiError> {
    Ok(Json(ctx.engine.tickets.list_for_facility(id)?))
}
