use crate::api::state::AppState;
use axum::extract::State;
use axum::Json;
use log::trace;

pub async fn handle_root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "API is running" }))
}

pub async fn handle_health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let storage_ok = state.storage.health_check().is_ok();
    trace!("health check: storage_ok={}", storage_ok);
    Json(serde_json::json!({
        "status": if storage_ok { "healthy" } else { "degraded" },
        "storage_ok": storage_ok,
    }))
}
