//! Score submission model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{submission_identity, ParticipantId, SubmissionId, WorkoutId};

/// One participant's result for one workout.
///
/// Duration fields hold the raw `minutes:seconds` strings as entered;
/// parsing happens during score normalization so malformed data surfaces
/// as a ranking error naming this record instead of vanishing at read
/// time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    /// Unique identifier (derived from participant_id + workout_id)
    pub id: SubmissionId,

    /// Participant this score belongs to
    pub participant_id: ParticipantId,

    /// Workout this score belongs to
    pub workout_id: WorkoutId,

    /// Raw scaling tier label, e.g. "RX"
    pub scaling: String,

    /// Whether the workout was completed inside the time cap
    pub completed: bool,

    /// Finish time as entered; present on completed entries
    pub finish_time: Option<String>,

    /// Total reps; present on non-completed entries (informational on
    /// completed reps-based entries)
    pub rep_count: Option<u32>,

    /// Tiebreak time as entered
    pub tiebreak_time: Option<String>,

    /// Placement points from the latest ranking pass (0 = not yet ranked)
    #[serde(default)]
    pub ranking_points: u32,

    /// When this score was first submitted
    pub submitted_at: DateTime<Utc>,

    /// When this score was last edited
    pub updated_at: DateTime<Utc>,
}

impl ScoreSubmission {
    /// Create a new submission with its identity-derived ID.
    pub fn new(
        participant_id: ParticipantId,
        workout_id: WorkoutId,
        scaling: String,
        completed: bool,
    ) -> Self {
        let id = submission_identity(&participant_id, &workout_id);
        let now = Utc::now();

        Self {
            id,
            participant_id,
            workout_id,
            scaling,
            completed,
            finish_time: None,
            rep_count: None,
            tiebreak_time: None,
            ranking_points: 0,
            submitted_at: now,
            updated_at: now,
        }
    }

    /// Builder method to set the finish time.
    pub fn with_finish_time(mut self, finish_time: impl Into<String>) -> Self {
        self.finish_time = Some(finish_time.into());
        self
    }

    /// Builder method to set the rep count.
    pub fn with_rep_count(mut self, rep_count: u32) -> Self {
        self.rep_count = Some(rep_count);
        self
    }

    /// Builder method to set the tiebreak time.
    pub fn with_tiebreak(mut self, tiebreak_time: impl Into<String>) -> Self {
        self.tiebreak_time = Some(tiebreak_time.into());
        self
    }

    /// Mark the submission as edited now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Whether a ranking pass has assigned points to this submission.
    pub fn is_ranked(&self) -> bool {
        self.ranking_points >= 1
    }
}
