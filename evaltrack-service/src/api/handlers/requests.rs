use crate::api::error::ApiResult;
use crate::api::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use evaltrack_core::application::CoarseStatusUpdate;
use evaltrack_core::domain::{EvaluationRequest, RequestDraft};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub assigned_to: Option<String>,
}

/// `POST /api/requests` — allocates a reference number and persists the
/// record; 201 with the stored representation.
pub async fn create_request(
    State(state): State<AppState>,
    Json(draft): Json<RequestDraft>,
) -> ApiResult<(StatusCode, Json<EvaluationRequest>)> {
    let record = state.tracker.create_request(&state.allocator, draft)?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /api/requests[?assignedTo=]`
pub async fn list_requests(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<EvaluationRequest>>> {
    let records = state.tracker.list_requests(params.assigned_to.as_deref())?;
    Ok(Json(records))
}

/// `PUT /api/requests/:id` — coarse status update.
pub async fn update_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<CoarseStatusUpdate>,
) -> ApiResult<Json<EvaluationRequest>> {
    let record = state.tracker.set_coarse_status(&id, update)?;
    Ok(Json(record))
}

/// `DELETE /api/requests/:id` — deletes one request and renumbers the
/// survivors so references stay dense.
pub async fn delete_request(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<serde_json::Value>> {
    state.tracker.delete_request(&id, &state.allocator)?;
    Ok(Json(serde_json::json!({ "message": "Request deleted successfully" })))
}

/// `DELETE /api/requests` — bulk delete plus counter reset.
pub async fn delete_all_requests(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let removed = state.allocator.reset_all()?;
    Ok(Json(serde_json::json!({ "message": "All requests deleted", "deleted": removed })))
}
