//! Workout ranking engine.
//!
//! Pure, synchronous score computation:
//! - **normalize**: raw submission + workout definition -> comparable record
//! - **compare**: per-mode ordering rules between two comparable records
//! - **rank**: one workout's full ranking pass with 1-based points
//! - **aggregate**: fold per-workout placements into the overall board
//! - **display**: ordinals, clock and rounds-and-reps score strings
//!
//! Everything here is deterministic over a snapshot of submissions; stores
//! and HTTP live elsewhere.

pub mod aggregate;
pub mod compare;
pub mod display;
pub mod normalize;
pub mod rank;

pub use aggregate::{assign_overall_placements, overall_standings, placement_tallies};
pub use compare::compare_scores;
pub use display::{ordinal, score_display};
pub use normalize::{normalize, NormalizedScore};
pub use rank::{rank_workout, RankedScore};

use thiserror::Error;

use crate::models::SubmissionId;

/// Errors that fail a workout's ranking pass.
///
/// A single bad record fails the whole pass for its workout: partial
/// orderings over silently dropped records would corrupt placements.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    #[error("submission {submission_id}: malformed {field} {value:?} (expected minutes:seconds)")]
    MalformedDuration {
        submission_id: SubmissionId,
        field: &'static str,
        value: String,
    },

    #[error("submission {submission_id}: {reason}")]
    InconsistentSubmission {
        submission_id: SubmissionId,
        reason: String,
    },
}
