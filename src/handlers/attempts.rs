// src/handlers/attempts.rs

use std::sync::Arc;

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    error::AppError,
    models::attempt::{CreateAttemptRequest, NewAttempt},
    store::AttemptStore,
    utils::jwt::Claims,
};

/// Records a finished quiz that the client graded itself (e.g. a generated quiz).
///
/// Accuracy and XP are derived here; the client only reports the outcome.
pub async fn create_attempt(
    State(store): State<Arc<dyn AttemptStore>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateAttemptRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user_id = claims.user_id()?;
    let attempt = NewAttempt::new(user_id, payload.score, payload.total, payload.topics);
    let record = store.insert_attempt(attempt).await?;

    tracing::info!(user_id, attempt_id = record.id, xp = record.xp, "Saved quiz attempt");

    Ok((StatusCode::CREATED, Json(record)))
}

/// Lists the caller's attempts, oldest first.
pub async fn list_attempts(
    State(store): State<Arc<dyn AttemptStore>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let attempts = store.list_attempts(user_id).await?;

    Ok(Json(attempts))
}
