use super::correlation::CorrelationId;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use log::{debug, error, trace, warn};
use std::time::Instant;

pub async fn logging_middleware(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = uri.path().to_string();
    let client_ip =
        req.extensions().get::<ConnectInfo<std::net::SocketAddr>>().map(|ConnectInfo(addr)| addr.ip().to_string()).unwrap_or_default();
    let correlation_id = req.extensions().get::<CorrelationId>().map(|id| id.0.clone());
    let start = Instant::now();

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = response.status();
    let is_health_like = matches!(path.as_str(), "/api" | "/health");

    if is_health_like {
        trace!(
            target: "http",
            "health check correlation_id={} client_ip={} method={} path={} status={} duration_ms={}",
            correlation_id.as_deref().unwrap_or(""),
            client_ip,
            method,
            path,
            status.as_u16(),
            duration.as_millis()
        );
    } else if status.is_server_error() {
        error!(
            target: "http",
            "request failed correlation_id={} client_ip={} method={} path={} status={} duration_ms={}",
            correlation_id.as_deref().unwrap_or(""),
            client_ip,
            method,
            path,
            status.as_u16(),
            duration.as_millis()
        );
    } else if status.is_client_error() {
        warn!(
            target: "http",
            "request rejected correlation_id={} client_ip={} method={} path={} status={} duration_ms={}",
            correlation_id.as_deref().unwrap_or(""),
            client_ip,
            method,
            path,
            status.as_u16(),
            duration.as_millis()
        );
    } else {
        debug!(
            target: "http",
            "request correlation_id={} client_ip={} method={} path={} status={} duration_ms={}",
            correlation_id.as_deref().unwrap_or(""),
            client_ip,
            method,
            path,
            status.as_u16(),
            duration.as_millis()
        );
    }

    response
}
