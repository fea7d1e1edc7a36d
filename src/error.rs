// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // 400 Bad Request
    #[error("bad request: {0}")]
    BadRequest(String),

    // 404 Not Found
    #[error("not found: {0}")]
    NotFound(String),
}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Lets handlers use `?` on `payload.validate()`.
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Failure while turning Markdown into sanitized HTML.
///
/// Never leaves [`crate::render::SafeRenderer::render`]; the renderer logs it
/// and falls back to the raw input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("input is {len} bytes, limit is {max} bytes")]
    InputTooLarge { len: usize, max: usize },

    #[error("markdown conversion failed: {0}")]
    Convert(String),

    #[error("sanitization failed: {0}")]
    Sanitize(String),
}

/// Invalid startup configuration. Fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("page window must be four comma-separated positive integers, got {0:?}")]
    InvalidPageWindow(String),

    #[error("{0} must be a positive integer")]
    NotPositive(&'static str),
}
