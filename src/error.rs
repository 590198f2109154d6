// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::generation::GenerationError;

/// Body returned for every model-side generation failure.
pub const GENERATION_FAILED_MESSAGE: &str = "AI generation failed";

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    AuthError(String),


    // 409 Conflict (e.g., duplicate username)
    Conflict(String),

    // 413 Payload Too Large (syllabus over the upload limit)
    PayloadTooLarge(String),

    // 415 Unsupported Media Type (non-text syllabus upload)
    UnsupportedMedia(String),

    // 502 Bad Gateway. The detail is logged, never sent to the client.
    GenerationFailed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::AuthError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            AppError::UnsupportedMedia(msg) => (StatusCode::UNSUPPORTED_MEDIA_TYPE, msg),
            AppError::GenerationFailed(msg) => {
                tracing::error!("Quiz generation failed: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    GENERATION_FAILED_MESSAGE.to_string(),
                )
            }
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Converts `sqlx::Error` into `AppError::InternalServerError`.
/// Allows using `?` operator on database queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

/// Input problems are reported to the caller; everything that happens after the
/// prompt leaves the service collapses into one generic failure.
impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::InputMissing(msg) => AppError::BadRequest(msg),
            GenerationError::UnsupportedContent(msg) => AppError::UnsupportedMedia(msg),
            other => AppError::GenerationFailed(other.to_string()),
        }
    }
}
