use crate::api::error::ApiResult;
use crate::api::state::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use evaltrack_core::application::{compute_member_stats, MemberStats};
use evaltrack_core::domain::TeamMember;
use evaltrack_core::TrackerError;
use serde::Deserialize;

pub async fn list_team_members(State(state): State<AppState>) -> ApiResult<Json<Vec<TeamMember>>> {
    Ok(Json(state.storage.list_team_members()?))
}

pub async fn get_team_member(State(state): State<AppState>, Path(name): Path<String>) -> ApiResult<Json<TeamMember>> {
    let member = state
        .storage
        .get_team_member(&name)?
        .ok_or_else(|| TrackerError::not_found(format!("team member {name}")))?;
    Ok(Json(member))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsParams {
    pub evaluator_id: Option<String>,
}

/// `GET /api/teamMembers/stats[?evaluatorId=]` — derived live from the
/// request collection, not from the stored member tallies.
pub async fn team_member_stats(
    State(state): State<AppState>,
    Query(params): Query<StatsParams>,
) -> ApiResult<Json<Vec<MemberStats>>> {
    let requests = state.storage.list_requests()?;
    Ok(Json(compute_member_stats(&requests, params.evaluator_id.as_deref())))
}
