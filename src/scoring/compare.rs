//! Ordering rules between two normalized scores.
//!
//! The ranked list for any workout is two blocks: everyone who completed
//! the workout, then everyone who was capped. Keys within each block
//! depend on the scoring mode:
//!
//! - time-based, completed: scaling tier, then finish time, then tiebreak
//! - time-based, capped: reps (more is better), then tiebreak
//! - reps-based, completed: finish time only
//! - reps-based, capped: reps (more is better), then tiebreak
//!
//! Capped entries rank on reps alone regardless of tier, and the
//! reps-based completed block ignores tier as well; both asymmetries are
//! intentional. Ties compare equal so a stable sort preserves submission
//! order.

use std::cmp::{Ordering, Reverse};

use crate::models::ScoringMode;

use super::NormalizedScore;

fn secs_or_max(secs: Option<u32>) -> u32 {
    secs.unwrap_or(u32::MAX)
}

/// Compare two normalized scores for the same workout.
/// `Ordering::Less` means `a` ranks better.
pub fn compare_scores(mode: ScoringMode, a: &NormalizedScore, b: &NormalizedScore) -> Ordering {
    let block = b.completed.cmp(&a.completed);
    if block != Ordering::Equal {
        return block;
    }

    if a.completed {
        match mode {
            ScoringMode::TimeBased => {
                let key_a = (a.scaling_rank, secs_or_max(a.finish_secs), secs_or_max(a.tiebreak_secs));
                let key_b = (b.scaling_rank, secs_or_max(b.finish_secs), secs_or_max(b.tiebreak_secs));
                key_a.cmp(&key_b)
            }
            ScoringMode::RepsBased => secs_or_max(a.finish_secs).cmp(&secs_or_max(b.finish_secs)),
        }
    } else {
        let key_a = (Reverse(a.reps), secs_or_max(a.tiebreak_secs));
        let key_b = (Reverse(b.reps), secs_or_max(b.tiebreak_secs));
        key_a.cmp(&key_b)
    }
}
