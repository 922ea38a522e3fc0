//! Error-to-HTTP response conversion.
//!
//! Route handlers return `Result<T, ApiError>`; failures are rendered as the
//! `{"status": "ERR", "message": ...}` envelope clients already understand.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Error envelope returned by every failing API route.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Always `ERR`
    pub status: String,
    /// Human-readable failure description
    pub message: String,
}

/// An error that knows which HTTP status it maps to.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<dashgate_core::Error> for ApiError {
    fn from(e: dashgate_core::Error) -> Self {
        let status =
            StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if e.is_client_error() {
            tracing::debug!(status = %status, kind = e.kind(), error = %e, "Rejected API request");
        } else {
            tracing::error!(status = %status, kind = e.kind(), error = %e, "Pipeline error in API handler");
        }

        Self::new(status, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status: "ERR".to_string(),
            message: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}
