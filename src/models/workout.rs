//! Workout definitions and the competition programme.

use serde::{Deserialize, Serialize};

use super::{ClockTime, WorkoutId};

/// How a workout turns raw scores into an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Lower finish time wins; athletes over the cap rank by reps.
    TimeBased,
    /// Higher rep count wins; finishing the final movement under the cap
    /// ranks ahead of any rep count.
    RepsBased,
}

/// Rep scheme for workouts whose rounds grow on each pass.
///
/// Round `n` requires `offset + step * n` reps beyond the previous round,
/// so a (3, 5) ladder asks for 8, 11, 14, 17, ... reps per round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepLadder {
    pub step: u32,
    pub offset: u32,
}

impl RepLadder {
    pub fn new(step: u32, offset: u32) -> Self {
        Self { step, offset }
    }

    /// Reps required to finish round `round` (1-based).
    pub fn requirement(&self, round: u32) -> u64 {
        self.offset as u64 + self.step as u64 * round as u64
    }

    /// Total reps required to finish `rounds` whole rounds.
    pub fn cumulative(&self, rounds: u32) -> u64 {
        let n = rounds as u64;
        self.offset as u64 * n + self.step as u64 * n * (n + 1) / 2
    }

    /// Recover whole rounds and leftover reps from a flat rep count.
    ///
    /// Returns the largest `rounds` with `cumulative(rounds) <= total_reps`
    /// and the remainder, so `0 <= extra < requirement(rounds + 1)`.
    pub fn split(&self, total_reps: u32) -> (u32, u32) {
        let total = total_reps as u64;

        if self.step == 0 {
            if self.offset == 0 {
                return (0, total_reps);
            }
            let rounds = total / self.offset as u64;
            return (rounds as u32, (total % self.offset as u64) as u32);
        }

        // Closed-form root of the cumulative quadratic, then clamp:
        // f64 rounding must not move the answer off by one.
        let s = self.step as f64;
        let b = 2.0 * self.offset as f64 + s;
        let estimate = ((b * b + 8.0 * s * total as f64).sqrt() - b) / (2.0 * s);
        let mut rounds = estimate.max(0.0).floor() as u32;

        while self.cumulative(rounds + 1) <= total {
            rounds += 1;
        }
        while rounds > 0 && self.cumulative(rounds) > total {
            rounds -= 1;
        }

        let extra = total - self.cumulative(rounds);
        (rounds, extra as u32)
    }
}

/// A single scored workout in the competition programme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDefinition {
    /// Workout identifier, e.g. "26.1"
    pub id: WorkoutId,

    /// Display name
    pub name: String,

    /// Scoring mode
    pub scoring: ScoringMode,

    /// Time cap, if the workout has one
    pub time_cap: Option<ClockTime>,

    /// Rep scheme for rounds-and-reps score display
    pub rep_ladder: Option<RepLadder>,
}

impl WorkoutDefinition {
    pub fn new(id: WorkoutId, name: String, scoring: ScoringMode) -> Self {
        Self {
            id,
            name,
            scoring,
            time_cap: None,
            rep_ladder: None,
        }
    }

    /// Builder method to set the time cap.
    pub fn with_time_cap(mut self, cap: ClockTime) -> Self {
        self.time_cap = Some(cap);
        self
    }

    /// Builder method to set the rep ladder.
    pub fn with_rep_ladder(mut self, ladder: RepLadder) -> Self {
        self.rep_ladder = Some(ladder);
        self
    }
}

/// The competition programme: an ordered list of workout definitions.
///
/// Fixed at setup time; ranking passes and aggregation walk workouts in
/// this order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competition {
    pub name: String,
    pub workouts: Vec<WorkoutDefinition>,
}

impl Competition {
    pub fn new(name: String) -> Self {
        Self {
            name,
            workouts: Vec::new(),
        }
    }

    /// Builder method to append a workout.
    pub fn with_workout(mut self, workout: WorkoutDefinition) -> Self {
        self.workouts.push(workout);
        self
    }

    /// Look up a workout by ID.
    pub fn workout(&self, id: &WorkoutId) -> Option<&WorkoutDefinition> {
        self.workouts.iter().find(|w| &w.id == id)
    }
}
