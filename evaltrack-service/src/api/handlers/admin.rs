use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use axum::extract::State;
use axum::Json;
use evaltrack_core::TrackerError;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResetCounterBody {
    pub confirm: bool,
}

/// `POST /api/reset-counter` — zeroes the counter while leaving requests in
/// place. This can mint duplicate reference numbers afterwards (the stored
/// records keep theirs), which is why the body must carry `"confirm": true`.
pub async fn reset_counter(State(state): State<AppState>, body: Option<Json<ResetCounterBody>>) -> ApiResult<Json<serde_json::Value>> {
    let confirmed = body.map(|Json(b)| b.confirm).unwrap_or(false);
    if !confirmed {
        return Err(ApiError(TrackerError::validation(
            "counter reset requires {\"confirm\": true}; live requests keep their reference numbers and duplicates become possible",
        )));
    }
    state.allocator.reset_counter_only()?;
    Ok(Json(serde_json::json!({ "message": "Counter reset to 0" })))
}
