//! Human-readable score and placement formatting.

use crate::models::{ClockTime, WorkoutDefinition};

use super::NormalizedScore;

/// Format a 1-based placement as an ordinal, e.g. "1st", "22nd", "113th".
pub fn ordinal(placement: u32) -> String {
    let suffix = match (placement % 10, placement % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", placement, suffix)
}

/// Format a normalized score for display.
///
/// Completed entries show their finish time. Capped entries show reps,
/// folded into rounds + extra reps when the workout carries a rep ladder.
pub fn score_display(workout: &WorkoutDefinition, score: &NormalizedScore) -> String {
    if score.completed {
        return match score.finish_secs {
            Some(secs) => ClockTime::from_seconds(secs).to_string(),
            None => "-".to_string(),
        };
    }

    match workout.rep_ladder {
        Some(ladder) => {
            let (rounds, extra) = ladder.split(score.reps);
            if extra == 0 {
                format!("{} rounds", rounds)
            } else {
                format!("{} rounds + {} reps", rounds, extra)
            }
        }
        None => format!("{} reps", score.reps),
    }
}
