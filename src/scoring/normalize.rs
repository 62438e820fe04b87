//! Score normalization.
//!
//! Converts a raw submission plus its workout definition into the
//! canonical record the comparator works on, validating field presence
//! against the completed flag on the way.

use crate::models::{
    ClockTime, ParticipantId, ScalingTier, ScoreSubmission, ScoringMode, SubmissionId,
    WorkoutDefinition,
};

use super::RankError;

/// Canonical comparable form of one submission.
///
/// Absent durations stay `None` and are treated as +infinity by every
/// ascending-time comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedScore {
    pub submission_id: SubmissionId,
    pub participant_id: ParticipantId,
    pub completed: bool,
    pub finish_secs: Option<u32>,
    pub reps: u32,
    pub tiebreak_secs: Option<u32>,
    pub scaling_rank: u8,
}

fn parse_duration_field(
    submission: &ScoreSubmission,
    field: &'static str,
    raw: &Option<String>,
) -> Result<Option<u32>, RankError> {
    match raw {
        None => Ok(None),
        Some(value) => {
            let clock: ClockTime =
                value
                    .parse()
                    .map_err(|_| RankError::MalformedDuration {
                        submission_id: submission.id.clone(),
                        field,
                        value: value.clone(),
                    })?;
            Ok(Some(clock.total_seconds()))
        }
    }
}

fn inconsistent(submission: &ScoreSubmission, reason: &str) -> RankError {
    RankError::InconsistentSubmission {
        submission_id: submission.id.clone(),
        reason: reason.to_string(),
    }
}

/// Normalize one submission against its workout definition.
pub fn normalize(
    workout: &WorkoutDefinition,
    submission: &ScoreSubmission,
) -> Result<NormalizedScore, RankError> {
    let finish_secs = parse_duration_field(submission, "finish_time", &submission.finish_time)?;
    let tiebreak_secs =
        parse_duration_field(submission, "tiebreak_time", &submission.tiebreak_time)?;

    if submission.completed {
        if finish_secs.is_none() {
            return Err(inconsistent(submission, "completed entry has no finish_time"));
        }
        if workout.scoring == ScoringMode::TimeBased && submission.rep_count.is_some() {
            return Err(inconsistent(
                submission,
                "completed time-based entry carries a rep_count",
            ));
        }
    } else {
        if submission.rep_count.is_none() {
            return Err(inconsistent(
                submission,
                "non-completed entry has no rep_count",
            ));
        }
        if finish_secs.is_some() {
            return Err(inconsistent(
                submission,
                "non-completed entry carries a finish_time",
            ));
        }
    }

    Ok(NormalizedScore {
        submission_id: submission.id.clone(),
        participant_id: submission.participant_id.clone(),
        completed: submission.completed,
        finish_secs,
        reps: submission.rep_count.unwrap_or(0),
        tiebreak_secs,
        scaling_rank: ScalingTier::from_label(&submission.scaling).rank(),
    })
}
