use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::sync::Arc;

use crate::api::Resource;
use crate::error::AppResult;
use crate::models::RecordId;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/panels", get(list_panels))
        .route("/panels/{kind}", get(show_panel))
        .route("/panels/{kind}/reload", post(reload_panel))
        .route("/panels/{kind}/sort", post(sort_panel))
        .route("/panels/{kind}/form", post(open_form).patch(update_form).delete(close_form))
        .route("/panels/{kind}/form/submit", post(submit_form))
        .route("/panels/{kind}/records/{id}", delete(delete_record))
        .route("/panels/{kind}/pending-delete", delete(cancel_delete))
}

#[derive(Debug, Serialize)]
struct PanelSummary {
    kind: Resource,
    title: &'static str,
    path: String,
}

// GET /api/panels
async fn list_panels() -> Json<Vec<PanelSummary>> {
    let panels = Resource::ALL
        .into_iter()
        .map(|kind| PanelSummary {
            kind,
            title: kind.title(),
            path: format!("/api/panels/{}", kind.path()),
        })
        .collect();
    Json(panels)
}

#[derive(Debug, Deserialize)]
struct PanelQuery {
    search: Option<String>,
    page: Option<usize>,
}

// GET /api/panels/{kind}?search=&page=
async fn show_panel(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<Resource>,
    Query(params): Query<PanelQuery>,
) -> impl IntoResponse {
    Json(state.console.search(kind, params.search, params.page).await)
}

// POST /api/panels/{kind}/reload
async fn reload_panel(State(state): State<Arc<AppState>>, Path(kind): Path<Resource>) -> AppResult<impl IntoResponse> {
    Ok(Json(state.console.reload(kind).await?))
}

#[derive(Debug, Deserialize)]
struct SortRequest {
    column: String,
}

// POST /api/panels/{kind}/sort
async fn sort_panel(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<Resource>,
    Json(req): Json<SortRequest>,
) -> impl IntoResponse {
    Json(state.console.sort(kind, &req.column).await)
}

#[derive(Debug, Default, Deserialize)]
struct OpenFormRequest {
    /// Absent for the create form.
    #[serde(default)]
    id: Option<RecordId>,
}

// POST /api/panels/{kind}/form
async fn open_form(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<Resource>,
    Json(req): Json<OpenFormRequest>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.console.open_form(kind, req.id).await?))
}

// PATCH /api/panels/{kind}/form
async fn update_form(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<Resource>,
    Json(values): Json<Map<String, Value>>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(state.console.update_form(kind, values).await?))
}

// DELETE /api/panels/{kind}/form
async fn close_form(State(state): State<Arc<AppState>>, Path(kind): Path<Resource>) -> impl IntoResponse {
    Json(state.console.close_form(kind).await)
}

// POST /api/panels/{kind}/form/submit
async fn submit_form(State(state): State<Arc<AppState>>, Path(kind): Path<Resource>) -> AppResult<impl IntoResponse> {
    let panel = state.console.submit_form(kind).await?;
    Ok(Json(json!({ "success": true, "panel": panel })))
}

// DELETE /api/panels/{kind}/records/{id}
// The first call arms the delete; repeating it for the same id performs it.
async fn delete_record(
    State(state): State<Arc<AppState>>,
    Path((kind, id)): Path<(Resource, String)>,
) -> AppResult<impl IntoResponse> {
    let (outcome, panel) = state.console.delete(kind, RecordId::new(id)).await?;
    Ok(Json(json!({ "success": true, "outcome": outcome, "panel": panel })))
}

// DELETE /api/panels/{kind}/pending-delete
async fn cancel_delete(State(state): State<Arc<AppState>>, Path(kind): Path<Resource>) -> impl IntoResponse {
    Json(state.console.cancel_delete(kind).await)
}
