use axum::extract::{Path, State};
use axum::Json;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::service::{NewScore, ServiceError};

use super::workouts::{outcome_response, WorkoutLeaderboardResponse};

/// Submit or edit a score, then return the workout's refreshed standings.
///
/// Submissions are keyed by participant and workout, so a second PUT from
/// the same participant replaces the first.
pub async fn submit_score(
    State(state): State<AppState>,
    Path(workout_id): Path<String>,
    Json(payload): Json<NewScore>,
) -> Result<Json<WorkoutLeaderboardResponse>, ApiError> {
    let outcome = state
        .service
        .submit_score(&workout_id.into(), payload)
        .await
        .map_err(|e| match e {
            // Validation failures belong to the caller
            ServiceError::Rank(_) => ApiError::BadRequest(e.to_string()),
            other => ApiError::from(other),
        })?;
    Ok(Json(outcome_response(outcome)))
}

/// Withdraw a participant's score and return the re-ranked standings.
pub async fn withdraw_score(
    State(state): State<AppState>,
    Path((workout_id, participant_id)): Path<(String, String)>,
) -> Result<Json<WorkoutLeaderboardResponse>, ApiError> {
    let outcome = state
        .service
        .withdraw(&workout_id.into(), &participant_id.into())
        .await?;
    Ok(Json(outcome_response(outcome)))
}
