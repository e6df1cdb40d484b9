use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use evaltrack_core::application::FileSlot;
use evaltrack_core::domain::{EvaluationRequest, TeamMember};
use evaltrack_core::TrackerError;
use log::debug;
use serde::Deserialize;

/// Attachment payload. Bytes travel base64-encoded inside the JSON body;
/// the blob store enforces type and size limits on the decoded bytes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadBody {
    pub request_id: String,
    pub file_name: String,
    pub content_base64: String,
}

fn decode_content(body: &UploadBody) -> Result<Vec<u8>, ApiError> {
    if body.content_base64.is_empty() {
        return Err(ApiError(TrackerError::validation("no file uploaded")));
    }
    BASE64
        .decode(&body.content_base64)
        .map_err(|err| ApiError(TrackerError::validation(format!("invalid base64 content: {err}"))))
}

async fn store_and_attach(state: &AppState, body: UploadBody, slot: FileSlot) -> ApiResult<Json<EvaluationRequest>> {
    let bytes = decode_content(&body)?;
    // Resolve the request before writing the blob so an unknown id does not
    // leave an orphaned file behind.
    state.tracker.get_request(&body.request_id)?;
    let blob = state.blobs.store(&body.file_name, &bytes)?;
    let record = state.tracker.attach_file(&body.request_id, slot, &body.file_name, &blob.url_path)?;
    debug!("attached file request_id={} slot={:?} stored={}", body.request_id, slot, blob.stored_name);
    Ok(Json(record))
}

/// `POST /api/upload` — evaluator-side attachment.
pub async fn upload_evaluator_file(State(state): State<AppState>, Json(body): Json<UploadBody>) -> ApiResult<Json<EvaluationRequest>> {
    store_and_attach(&state, body, FileSlot::Evaluator).await
}

/// `POST /api/requester/upload` — requester-side attachment.
pub async fn upload_requester_file(State(state): State<AppState>, Json(body): Json<UploadBody>) -> ApiResult<Json<EvaluationRequest>> {
    store_and_attach(&state, body, FileSlot::Requester).await
}

/// `GET /api/download/:filename`
pub async fn download(State(state): State<AppState>, Path(filename): Path<String>) -> ApiResult<Response> {
    let bytes = state.blobs.retrieve(&filename)?;
    let headers = [
        (header::CONTENT_TYPE, "application/octet-stream".to_string()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")),
    ];
    Ok((StatusCode::OK, headers, bytes).into_response())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUploadBody {
    pub evaluator_id: String,
    pub file_name: String,
    pub content_base64: String,
}

/// `POST /api/uploadProfile` — stores the image and upserts the team
/// member's profile path (creating the member when absent).
pub async fn upload_profile(State(state): State<AppState>, Json(body): Json<ProfileUploadBody>) -> ApiResult<Json<serde_json::Value>> {
    if body.content_base64.is_empty() {
        return Err(ApiError(TrackerError::validation("no profile image uploaded")));
    }
    let bytes = BASE64
        .decode(&body.content_base64)
        .map_err(|err| ApiError(TrackerError::validation(format!("invalid base64 content: {err}"))))?;
    let blob = state.blobs.store(&body.file_name, &bytes)?;

    let mut member = state.storage.get_team_member(&body.evaluator_id)?.unwrap_or(TeamMember {
        name: body.evaluator_id.clone(),
        open_tasks: 0,
        closed_tasks: 0,
        completion_rate: 0,
        profile_image: None,
    });
    member.profile_image = Some(blob.url_path.clone());
    state.storage.upsert_team_member(member)?;

    Ok(Json(serde_json::json!({
        "message": "Profile image uploaded successfully",
        "filePath": blob.url_path,
    })))
}
