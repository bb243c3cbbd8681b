use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::booking::FarePage;
use crate::error::AppResult;
use crate::middleware::SignedIn;
use crate::models::{RecordId, SeatClass};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookings/sessions", post(open_session))
        .route("/bookings/sessions/{id}", get(get_session).delete(close_session))
        .route("/bookings/sessions/{id}/seat", patch(click_seat))
        .route("/bookings/sessions/{id}/class", patch(select_class))
        .route("/bookings/sessions/{id}/submit", post(submit_booking))
}

/* ---------- SESSIONS ---------- */

#[derive(Debug, Deserialize)]
struct OpenSessionRequest {
    flight_id: RecordId,
    /// Which page's fare schedule prices this booking.
    #[serde(default)]
    page: FarePage,
}

// POST /api/bookings/sessions
async fn open_session(
    State(state): State<Arc<AppState>>,
    _user: SignedIn,
    Json(req): Json<OpenSessionRequest>,
) -> AppResult<impl IntoResponse> {
    let session = state.desk.open(&req.flight_id, req.page).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

// GET /api/bookings/sessions/{id}
async fn get_session(
    State(state): State<Arc<AppState>>,
    _user: SignedIn,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.desk.get(id).await?))
}

// DELETE /api/bookings/sessions/{id}
async fn close_session(
    State(state): State<Arc<AppState>>,
    _user: SignedIn,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.desk.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/* ---------- SEAT & CLASS ---------- */

#[derive(Debug, Deserialize)]
struct SeatRequest {
    seat: String,
}

// PATCH /api/bookings/sessions/{id}/seat
async fn click_seat(
    State(state): State<Arc<AppState>>,
    _user: SignedIn,
    Path(id): Path<Uuid>,
    Json(req): Json<SeatRequest>,
) -> AppResult<impl IntoResponse> {
    let (change, session) = state.desk.click_seat(id, &req.seat).await?;
    Ok(Json(json!({ "change": change, "session": session })))
}

#[derive(Debug, Deserialize)]
struct ClassRequest {
    class: SeatClass,
}

// PATCH /api/bookings/sessions/{id}/class
async fn select_class(
    State(state): State<Arc<AppState>>,
    _user: SignedIn,
    Path(id): Path<Uuid>,
    Json(req): Json<ClassRequest>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.desk.select_class(id, req.class).await?))
}

/* ---------- SUBMIT ---------- */

// POST /api/bookings/sessions/{id}/submit
// Not behind SignedIn: a signed-out submit is reported like any other
// booking failure.
async fn submit_booking(State(state): State<Arc<AppState>>, Path(id): Path<Uuid>) -> AppResult<impl IntoResponse> {
    let user = state.session.current_user().await;
    let confirmation = state.desk.submit(id, user.as_ref()).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "booking": confirmation }))))
}
