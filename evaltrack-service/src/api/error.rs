use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use evaltrack_core::foundation::ErrorCode;
use evaltrack_core::TrackerError;
use log::error;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

/// Wrapper so handlers can end with `?` on core results.
pub struct ApiError(pub TrackerError);

impl From<TrackerError> for ApiError {
    fn from(err: TrackerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, message) = match err.code() {
            ErrorCode::NotFound => (StatusCode::NOT_FOUND, err.to_string()),
            ErrorCode::Validation | ErrorCode::InvalidStatus => (StatusCode::BAD_REQUEST, err.to_string()),
            // Storage and everything else: log the full error, hand the
            // client a generic description plus the underlying string.
            _ => {
                error!("request failed with internal error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("internal error: {err}"))
            }
        };
        (status, Json(ErrorBody { message })).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
