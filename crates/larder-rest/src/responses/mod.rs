//! API response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use larder_core::{ErrorResponse, LarderError};
use tracing::warn;

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub LarderError);

impl From<LarderError> for AppError {
    fn from(err: LarderError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            warn!("Request failed: {}", self.0);
        }

        (status, Json(ErrorResponse::from_error(&self.0))).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Builds a JSON error body with an explicit code, for boundary rejections.
pub fn error_body(status: StatusCode, code: &str, message: impl Into<String>) -> Response {
    let body = ErrorResponse {
        code: code.to_string(),
        message: message.into(),
        details: None,
    };
    (status, Json(body)).into_response()
}
