//! Overall leaderboard aggregation.
//!
//! Two-phase pipeline over per-workout placement lists:
//! 1. tally each participant's points per workout (first-appearance order)
//! 2. stable-sort by total points ascending and assign overall placement
//!
//! A participant's total counts only the workouts they submitted to. No
//! worst-case points are substituted for missing workouts.

use std::collections::HashMap;

use crate::models::{OverallStanding, ParticipantId, WorkoutId};

/// Phase 1: fold per-workout `(participant, points)` lists into one tally
/// per participant. Workouts must arrive in competition order; the output
/// preserves first-appearance order, which later placement ties fall back
/// to.
pub fn placement_tallies(
    per_workout: &[(WorkoutId, Vec<(ParticipantId, u32)>)],
) -> Vec<OverallStanding> {
    let mut tallies: Vec<OverallStanding> = Vec::new();
    let mut index: HashMap<ParticipantId, usize> = HashMap::new();

    for (workout_id, placements) in per_workout {
        for (participant_id, points) in placements {
            let slot = *index.entry(participant_id.clone()).or_insert_with(|| {
                tallies.push(OverallStanding::new(participant_id.clone()));
                tallies.len() - 1
            });
            tallies[slot].record(workout_id, *points);
        }
    }

    tallies
}

/// Phase 2: order tallies by total points ascending (points are ranks, so
/// fewer is better) and assign 1-based overall placements. The sort is
/// stable; ties keep their tally order.
pub fn assign_overall_placements(mut tallies: Vec<OverallStanding>) -> Vec<OverallStanding> {
    tallies.sort_by_key(|tally| tally.total_points);
    for (index, tally) in tallies.iter_mut().enumerate() {
        tally.overall_placement = index as u32 + 1;
    }
    tallies
}

/// Full aggregation: both phases.
pub fn overall_standings(
    per_workout: &[(WorkoutId, Vec<(ParticipantId, u32)>)],
) -> Vec<OverallStanding> {
    assign_overall_placements(placement_tallies(per_workout))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workout(
        id: &str,
        placements: &[(&str, u32)],
    ) -> (WorkoutId, Vec<(ParticipantId, u32)>) {
        (
            WorkoutId::from(id),
            placements
                .iter()
                .map(|(participant, points)| (ParticipantId::from(*participant), *points))
                .collect(),
        )
    }

    fn placement_for(standings: &[OverallStanding], participant: &str) -> u32 {
        standings
            .iter()
            .find(|s| s.participant_id.as_str() == participant)
            .map(|s| s.overall_placement)
            .unwrap()
    }

    #[test]
    fn test_tallies_sum_points_per_participant() {
        let per_workout = vec![
            workout("26.1", &[("alice", 1), ("bob", 2)]),
            workout("26.2", &[("bob", 1), ("alice", 2)]),
        ];

        let tallies = placement_tallies(&per_workout);

        assert_eq!(tallies.len(), 2);
        let alice = tallies.iter().find(|t| t.participant_id.as_str() == "alice").unwrap();
        assert_eq!(alice.total_points, 3);
        assert_eq!(alice.workouts_counted(), 2);
    }

    #[test]
    fn test_missing_workout_contributes_nothing() {
        let per_workout = vec![
            workout("26.1", &[("alice", 1), ("bob", 2)]),
            workout("26.2", &[("bob", 1)]),
            workout("26.3", &[("alice", 1), ("bob", 2)]),
        ];

        let tallies = placement_tallies(&per_workout);

        let alice = tallies.iter().find(|t| t.participant_id.as_str() == "alice").unwrap();
        assert_eq!(alice.total_points, 2);
        assert_eq!(alice.workouts_counted(), 2);
        assert!(!alice.placements.contains_key("26.2"));

        let bob = tallies.iter().find(|t| t.participant_id.as_str() == "bob").unwrap();
        assert_eq!(bob.total_points, 5);
        assert_eq!(bob.workouts_counted(), 3);
    }

    #[test]
    fn test_overall_orders_by_total_ascending() {
        let per_workout = vec![
            workout("26.1", &[("alice", 1), ("bob", 2), ("cara", 3)]),
            workout("26.2", &[("bob", 1), ("cara", 2), ("alice", 3)]),
        ];

        let standings = overall_standings(&per_workout);

        // bob 3, alice 4, cara 5
        assert_eq!(placement_for(&standings, "bob"), 1);
        assert_eq!(placement_for(&standings, "alice"), 2);
        assert_eq!(placement_for(&standings, "cara"), 3);
        assert_eq!(standings[0].participant_id.as_str(), "bob");
    }

    #[test]
    fn test_overall_tie_keeps_first_appearance_order() {
        // Both total 3; bob appears first in the first workout's placements
        let per_workout = vec![
            workout("26.1", &[("bob", 1), ("alice", 2)]),
            workout("26.2", &[("alice", 1), ("bob", 2)]),
        ];

        let standings = overall_standings(&per_workout);

        assert_eq!(standings[0].participant_id.as_str(), "bob");
        assert_eq!(standings[0].overall_placement, 1);
        assert_eq!(standings[1].participant_id.as_str(), "alice");
        assert_eq!(standings[1].overall_placement, 2);
    }

    #[test]
    fn test_overall_placements_are_one_based_and_dense() {
        let per_workout = vec![workout("26.1", &[("alice", 1), ("bob", 2), ("cara", 3)])];

        let standings = overall_standings(&per_workout);

        let placements: Vec<u32> = standings.iter().map(|s| s.overall_placement).collect();
        assert_eq!(placements, vec![1, 2, 3]);
    }

    #[test]
    fn test_overall_empty_input() {
        let standings = overall_standings(&[]);
        assert!(standings.is_empty());
    }

    #[test]
    fn test_late_joiner_appears_after_earlier_participants() {
        let per_workout = vec![
            workout("26.1", &[("alice", 1)]),
            workout("26.2", &[("dana", 1), ("alice", 2)]),
        ];

        let tallies = placement_tallies(&per_workout);

        assert_eq!(tallies[0].participant_id.as_str(), "alice");
        assert_eq!(tallies[1].participant_id.as_str(), "dana");
    }
}
