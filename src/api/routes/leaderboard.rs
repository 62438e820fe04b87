use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::LeaderboardEntry;

#[derive(Debug, Serialize)]
pub struct OverallLeaderboardResponse {
    pub competition: String,
    pub entries: Vec<LeaderboardEntry>,
}

/// Overall standings across the whole programme, built from the points
/// stored by the last successful ranking pass per workout.
pub async fn overall_leaderboard(
    State(state): State<AppState>,
) -> Result<Json<OverallLeaderboardResponse>, ApiError> {
    let entries = state.service.overall_leaderboard().await?;
    Ok(Json(OverallLeaderboardResponse {
        competition: state.service.competition().name.clone(),
        entries,
    }))
}
