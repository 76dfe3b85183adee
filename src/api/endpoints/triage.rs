//! Conversational triage endpoints.
//!
//! Session revisions may consult the advisory oracle, which uses a
//! blocking HTTP client with its own timeout — so they run on the
//! blocking pool rather than the async executor.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::TriageSession;
use crate::sessions::{SessionUpdate, SummaryReport};

/// `POST /api/triage/sessions`
pub async fn start(
    State(ctx): State<ApiContext>,
) -> Result<(StatusCode, Json<TriageSession>), ApiError> {
    let session = ctx.engine.sessions.start_session()?;
    Ok((StatusCode::CREATED, Json(session)))
}

#[derive(Deserialize)]
pub struct InputPayload {
    pub text: String,
}

/// `POST /api/triage/sessions/:id/input`
pub async fn add_input(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
    Json(payload): Json<InputPayload>,
) -> Result<Json<SessionUpdate>, ApiError> {
    let engine = ctx.engine.clone();
    let update = tokio::task::spawn_blocking(move || engine.sessions.add_input(id, &payload.text))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;
    Ok(Json(update))
}

#[derive(Deserialize)]
pub struct AnswerPayload {
    pub question_id: String,
    pub answer: String,
}

/// `POST /api/triage/sessions/:id/answer`
pub async fn answer(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AnswerPayload>,
) -> Result<Json<SessionUpdate>, ApiError> {
    let engine = ctx.engine.clone();
    let update = tokio::task::spawn_blocking(move || {
        engine
            .sessions
            .answer_follow_up(id, &payload.question_id, &payload.answer)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;
    Ok(Json(update))
}

/// `GET /api/triage/sessions/:id/report`
pub async fn report(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<SummaryReport>, ApiError> {
    Ok(Json(ctx.engine.sessions.summary_report(id)?))
}

/// `DELETE /api/triage/sessions/:id`
pub async fn end(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ctx.engine.sessions.end_session(id)?;
    Ok(StatusCode::NO_CONTENT)
}
