//! Derived leaderboard views.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ParticipantId, SubmissionId, WorkoutId};

/// One ranked row of a single workout's leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutStanding {
    /// Placement within the workout (1 = best); equals the ranking points
    pub placement: u32,

    /// Submission behind this row
    pub submission_id: SubmissionId,

    /// Participant
    pub participant_id: ParticipantId,

    /// Scaling tier label as submitted
    pub scaling: String,

    /// Whether the workout was completed inside the cap
    pub completed: bool,

    /// Human-readable score, e.g. "12:34", "150 reps", "3 rounds + 5 reps"
    pub score_display: String,

    /// Human-readable tiebreak time, if any
    pub tiebreak_display: Option<String>,
}

/// Aggregate placement data for one participant across the competition.
///
/// `placements` maps workout ID to the points earned there; workouts with
/// no submission are simply absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallStanding {
    pub participant_id: ParticipantId,
    pub total_points: u32,
    pub overall_placement: u32,
    pub placements: BTreeMap<String, u32>,
}

impl OverallStanding {
    pub fn new(participant_id: ParticipantId) -> Self {
        Self {
            participant_id,
            total_points: 0,
            overall_placement: 0,
            placements: BTreeMap::new(),
        }
    }

    /// Record the points earned in one workout.
    pub fn record(&mut self, workout_id: &WorkoutId, points: u32) {
        self.placements.insert(workout_id.as_str().to_string(), points);
        self.total_points += points;
    }

    /// Number of workouts this participant submitted a score for.
    pub fn workouts_counted(&self) -> usize {
        self.placements.len()
    }
}

/// One row of the overall leaderboard, enriched for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub overall_placement: u32,
    pub participant_id: ParticipantId,
    pub display_name: String,
    pub total_points: u32,

    /// Workout ID to placement display, e.g. "26.1" -> "3rd"
    pub placements: BTreeMap<String, String>,
}
