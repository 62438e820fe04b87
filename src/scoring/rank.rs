//! Per-workout ranking pass.

use crate::models::{ScoreSubmission, WorkoutDefinition};

use super::{compare_scores, normalize, NormalizedScore, RankError};

/// One submission's normalized score with its assigned placement points.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedScore {
    pub score: NormalizedScore,
    pub points: u32,
}

/// Rank one workout's submissions.
///
/// Normalizes every record (failing the whole pass on the first bad one),
/// stable-sorts with the workout's comparison rules and assigns 1-based
/// points by position. Two records never share a points value; full ties
/// keep their snapshot order.
pub fn rank_workout(
    workout: &WorkoutDefinition,
    submissions: &[ScoreSubmission],
) -> Result<Vec<RankedScore>, RankError> {
    let mut scores = Vec::with_capacity(submissions.len());
    for submission in submissions {
        scores.push(normalize(workout, submission)?);
    }

    scores.sort_by(|a, b| compare_scores(workout.scoring, a, b));

    Ok(scores
        .into_iter()
        .enumerate()
        .map(|(index, score)| RankedScore {
            score,
            points: index as u32 + 1,
        })
        .collect())
}
