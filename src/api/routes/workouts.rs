use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{WorkoutDefinition, WorkoutStanding};
use crate::service::RankOutcome;

#[derive(Debug, Serialize)]
pub struct WorkoutsResponse {
    pub competition: String,
    pub workouts: Vec<WorkoutDefinition>,
}

pub async fn list_workouts(State(state): State<AppState>) -> Json<WorkoutsResponse> {
    let competition = state.service.competition();
    Json(WorkoutsResponse {
        competition: competition.name.clone(),
        workouts: competition.workouts.clone(),
    })
}

#[derive(Debug, Serialize)]
pub struct WorkoutLeaderboardResponse {
    pub workout_id: String,
    pub standings: Vec<WorkoutStanding>,

    /// Submissions whose point write-back failed this pass
    pub write_errors: Vec<String>,
}

pub(super) fn outcome_response(outcome: RankOutcome) -> WorkoutLeaderboardResponse {
    WorkoutLeaderboardResponse {
        workout_id: outcome.workout_id.as_str().to_string(),
        standings: outcome.standings,
        write_errors: outcome.write_errors,
    }
}

/// Run a fresh ranking pass for one workout and return its standings.
pub async fn workout_leaderboard(
    State(state): State<AppState>,
    Path(workout_id): Path<String>,
) -> Result<Json<WorkoutLeaderboardResponse>, ApiError> {
    let outcome = state.service.refresh_workout(&workout_id.into()).await?;
    Ok(Json(outcome_response(outcome)))
}
