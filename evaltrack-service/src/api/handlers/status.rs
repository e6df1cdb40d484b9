use crate::api::error::ApiResult;
use crate::api::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use evaltrack_core::application::DetailedStatusUpdate;
use evaltrack_core::domain::{EvaluationRequest, DETAILED_STATUSES};
use serde::Deserialize;

/// `PUT /api/requests/:id/updateDetailedStatus` — 404 unknown id, 400 when
/// the value is outside the closed enumeration, otherwise appends to the
/// history and returns the updated record.
pub async fn update_detailed_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<DetailedStatusUpdate>,
) -> ApiResult<Json<EvaluationRequest>> {
    let record = state.tracker.set_detailed_status(&id, update)?;
    Ok(Json(record))
}

#[derive(Debug, Default, Deserialize)]
pub struct RemarksBody {
    /// Absent field and explicit null both mean "undefined" and are
    /// rejected; an empty string is a valid value.
    pub remarks: Option<String>,
}

/// `PUT /api/requests/:id/updateRemarks`
pub async fn update_remarks(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RemarksBody>,
) -> ApiResult<Json<EvaluationRequest>> {
    let record = state.tracker.set_remarks(&id, body.remarks)?;
    Ok(Json(record))
}

/// `GET /api/detailedStatuses` — the same closed set the tracker validates
/// against, so clients never offer a code the server would reject.
pub async fn list_detailed_statuses() -> Json<&'static [&'static str]> {
    Json(DETAILED_STATUSES)
}
