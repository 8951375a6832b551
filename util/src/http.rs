//! The wire error body and the mapping from [`ApiError`] to HTTP responses.

use api::ApiError;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// JSON error body returned by every service:
/// `{timestamp, path, status, error, message}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpErrorInfo {
    pub timestamp: DateTime<Utc>,
    pub path: String,
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl HttpErrorInfo {
    pub fn new(status: StatusCode, path: &str, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            path: path.to_string(),
            status: status.as_u16(),
            error: status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string(),
            message: message.to_string(),
        }
    }
}

/// HTTP status an [`ApiError`] maps to.
pub fn status_for(err: &ApiError) -> StatusCode {
    match err {
        ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        ApiError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ApiError::EventProcessing(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Render an [`ApiError`] as the structured JSON error body.
pub fn error_to_response(err: &ApiError, path: &str) -> Response {
    let status = status_for(err);
    debug!("Returning HTTP status: {status} for path: {path}, message: {}", err.message());
    (status, Json(HttpErrorInfo::new(status, path, err.message()))).into_response()
}
