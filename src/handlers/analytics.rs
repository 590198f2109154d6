// src/handlers/analytics.rs

use axum::{
    Extension, Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    analytics::{AnalyticsReport, build_report},
    error::AppError,
    state::AppState,
    utils::jwt::Claims,
};

/// Query parameters for the analytics view.
#[derive(Debug, Deserialize)]
pub struct AnalyticsParams {
    /// Restrict the accuracy trend to this topic.
    pub topic: Option<String>,
}

/// Progress analytics for the caller.
///
/// A failed history read is logged and answered with an empty report marked
/// unavailable, so the dashboard can show its placeholder instead of an error.
pub async fn get_analytics(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<AnalyticsParams>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let topic = params.topic.filter(|t| !t.trim().is_empty());

    let report = match state.attempts.list_attempts(user_id).await {
        Ok(attempts) => build_report(
            user_id,
            &attempts,
            topic.as_deref(),
            state.config.stagnation_formula,
        ),
        Err(e) => {
            tracing::error!(user_id, "Failed to load attempts for analytics: {}", e);
            AnalyticsReport::unavailable(user_id, topic)
        }
    };

    Ok(Json(report))
}
