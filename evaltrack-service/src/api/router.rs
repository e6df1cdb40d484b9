use super::handlers::admin::reset_counter;
use super::handlers::health::{handle_health, handle_root};
use super::handlers::requests::{create_request, delete_all_requests, delete_request, list_requests, update_request};
use super::handlers::status::{list_detailed_statuses, update_detailed_status, update_remarks};
use super::handlers::suppliers::{create_pi_record, create_supplier, list_pi_records, list_suppliers};
use super::handlers::team_members::{get_team_member, list_team_members, team_member_stats};
use super::handlers::uploads::{download, upload_evaluator_file, upload_profile, upload_requester_file};
use super::middleware::correlation::correlation_middleware;
use super::middleware::logging::logging_middleware;
use super::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use evaltrack_core::TrackerError;
use log::{error, info};
use std::net::SocketAddr;
use tokio::net::TcpListener;

pub async fn run_http_server(addr: SocketAddr, state: AppState, max_body_bytes: usize) -> Result<(), TrackerError> {
    info!("binding http server addr={}", addr);
    let app = build_router(state, max_body_bytes);
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server ready and accepting connections addr={}", addr);
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await.map_err(|err| {
        error!("HTTP server terminated unexpectedly addr={} error={}", addr, err);
        TrackerError::Message(err.to_string())
    })
}

pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/api", get(handle_root))
        .route("/health", get(handle_health))
        .route("/api/requests", post(create_request).get(list_requests).delete(delete_all_requests))
        .route("/api/requests/:id", put(update_request).delete(delete_request))
        .route("/api/requests/:id/updateDetailedStatus", put(update_detailed_status))
        .route("/api/requests/:id/updateRemarks", put(update_remarks))
        .route("/api/detailedStatuses", get(list_detailed_statuses))
        .route("/api/reset-counter", post(reset_counter))
        .route("/api/suppliers", get(list_suppliers).post(create_supplier))
        .route("/api/piRecords", get(list_pi_records).post(create_pi_record))
        .route("/api/teamMembers", get(list_team_members))
        .route("/api/teamMembers/stats", get(team_member_stats))
        .route("/api/teamMembers/:name", get(get_team_member))
        .route("/api/upload", post(upload_evaluator_file))
        .route("/api/requester/upload", post(upload_requester_file))
        .route("/api/uploadProfile", post(upload_profile))
        .route("/api/download/:filename", get(download))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(axum::middleware::from_fn(logging_middleware))
        .layer(axum::middleware::from_fn(correlation_middleware))
        .with_state(state)
}
