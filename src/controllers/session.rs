use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use crate::api::user::{LoginRequest, RegisterRequest};
use crate::error::AppResult;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/session", get(current_session))
        .route("/session/login", post(login))
        .route("/session/register", post(register))
        .route("/session/logout", post(logout))
        .route("/session/refresh", post(refresh))
}

// GET /api/session
async fn current_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.session.state().await)
}

// POST /api/session/login
async fn login(State(state): State<Arc<AppState>>, Json(req): Json<LoginRequest>) -> AppResult<impl IntoResponse> {
    let user = state.session.login(req).await?;
    Ok(Json(json!({ "success": true, "user": user })))
}

// POST /api/session/register
async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let user = state.session.register(req).await?;
    Ok(Json(json!({ "success": true, "user": user })))
}

// POST /api/session/logout
async fn logout(State(state): State<Arc<AppState>>) -> AppResult<impl IntoResponse> {
    state.session.logout().await?;
    Ok(Json(json!({ "success": true })))
}

// POST /api/session/refresh
async fn refresh(State(state): State<Arc<AppState>>) -> AppResult<impl IntoResponse> {
    let user = state.session.refresh().await?;
    Ok(Json(json!({ "success": true, "user": user })))
}
