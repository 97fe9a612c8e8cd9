/// Submission listing and removal endpoints
use announce_core::models::SubmissionSummary;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use std::sync::Arc;

use crate::{context::ApiContext, error::ApiError};

pub async fn list(
    State(ctx): State<Arc<ApiContext>>,
) -> Result<Json<Vec<SubmissionSummary>>, ApiError> {
    let today = Utc::now().date_naive();
    Ok(Json(ctx.submissions.summaries(today).await?))
}

/// Delete a submission together with its slides and their files
pub async fn delete(
    State(ctx): State<Arc<ApiContext>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    match ctx.submissions.delete_submission(id).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(ApiError::NotFound(format!("Submission {} not found", id))),
    }
}
