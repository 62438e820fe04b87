//! Deterministic demo data generation.
//!
//! Fills the store with plausible profiles and scores so the boards have
//! something to show. Everything is drawn from a seeded RNG; the same
//! seed and participant count always produce the same data set.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::models::{ClockTime, ParticipantProfile, ScoreSubmission};
use crate::service::{RankingService, ServiceError};
use crate::storage::{JsonlScoreStore, SubmissionStore};

const FIRST_NAMES: &[&str] = &[
    "Alex", "Dana", "Riley", "Jordan", "Casey", "Morgan", "Quinn", "Sam", "Taylor", "Jamie",
    "Avery", "Rowan", "Skyler", "Reese", "Emerson", "Finley",
];

const LAST_NAMES: &[&str] = &[
    "Reyes", "Park", "Novak", "Okafor", "Lindqvist", "Marsh", "Ito", "Castillo", "Byrne",
    "Kowalski", "Haddad", "Ferreira", "Nguyen", "Sorensen", "Adeyemi", "Vance",
];

#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub participants: u32,
    pub seed: u64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            participants: 40,
            seed: 2026,
        }
    }
}

/// Summary of one seeding run.
#[derive(Debug, Default)]
pub struct SeedReport {
    pub profiles_written: u32,
    pub submissions_written: u32,
    pub workouts_ranked: u32,
    pub errors: Vec<String>,
}

fn pick_scaling(rng: &mut StdRng) -> &'static str {
    match rng.gen_range(0..10) {
        0..=5 => "RX",
        6..=8 => "scaled",
        _ => "foundations",
    }
}

/// Generate profiles and scores, then run a ranking pass per workout.
pub async fn seed_competition(
    store: &JsonlScoreStore,
    service: &RankingService,
    config: &SeedConfig,
) -> Result<SeedReport, ServiceError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut report = SeedReport::default();

    let participant_ids: Vec<String> = (1..=config.participants)
        .map(|index| format!("athlete-{:03}", index))
        .collect();

    for participant_id in &participant_ids {
        let name = format!(
            "{} {}",
            FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())],
            LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())]
        );
        store
            .upsert_profile(ParticipantProfile::new(participant_id.as_str().into(), name))
            .await?;
        report.profiles_written += 1;
    }

    let workouts = &service.competition().workouts;
    for workout in workouts {
        let cap_secs = workout
            .time_cap
            .map(|cap| cap.total_seconds())
            .unwrap_or(15 * 60)
            .max(120);

        for participant_id in &participant_ids {
            // Roughly one in ten athletes sits a workout out
            if rng.gen_bool(0.1) {
                continue;
            }

            let scaling = pick_scaling(&mut rng);
            let completed = rng.gen_bool(0.7);

            let mut submission = ScoreSubmission::new(
                participant_id.as_str().into(),
                workout.id.clone(),
                scaling.to_string(),
                completed,
            );

            if completed {
                let finish_secs = rng.gen_range(cap_secs * 55 / 100..cap_secs * 95 / 100);
                submission.finish_time = Some(ClockTime::from_seconds(finish_secs).to_string());
            } else {
                submission.rep_count = Some(rng.gen_range(30..160));
            }

            if rng.gen_bool(0.6) {
                let tiebreak_secs = rng.gen_range(45..180);
                submission.tiebreak_time =
                    Some(ClockTime::from_seconds(tiebreak_secs).to_string());
            }

            store.upsert_submission(submission).await?;
            report.submissions_written += 1;
        }
    }

    for workout in workouts {
        match service.refresh_workout(&workout.id).await {
            Ok(outcome) => {
                report.workouts_ranked += 1;
                report.errors.extend(outcome.write_errors);
            }
            Err(e) => report.errors.push(format!("{}: {}", workout.id, e)),
        }
    }

    info!(
        "Seeded {} profiles and {} submissions across {} workouts",
        report.profiles_written,
        report.submissions_written,
        report.workouts_ranked
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Competition, RepLadder, ScoringMode, WorkoutDefinition};
    use crate::storage::{StorageConfig, SubmissionStore};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn small_competition() -> Competition {
        Competition::new("Seed Test".to_string())
            .with_workout(
                WorkoutDefinition::new(
                    "26.1".into(),
                    "Open 26.1".to_string(),
                    ScoringMode::RepsBased,
                )
                .with_time_cap(ClockTime::from_seconds(15 * 60))
                .with_rep_ladder(RepLadder::new(3, 5)),
            )
            .with_workout(
                WorkoutDefinition::new(
                    "26.2".into(),
                    "Open 26.2".to_string(),
                    ScoringMode::TimeBased,
                )
                .with_time_cap(ClockTime::from_seconds(12 * 60)),
            )
    }

    fn make_service(tmp: &TempDir) -> (Arc<JsonlScoreStore>, RankingService) {
        let store = Arc::new(JsonlScoreStore::new(StorageConfig::new(
            tmp.path().to_path_buf(),
        )));
        let service = RankingService::new(small_competition(), store.clone(), store.clone());
        (store, service)
    }

    async fn seeded_scores(
        store: &JsonlScoreStore,
    ) -> Vec<(String, String, bool, Option<String>, Option<u32>, Option<String>)> {
        let mut rows = Vec::new();
        for workout in ["26.1", "26.2"] {
            for s in store
                .submissions_for_workout(&workout.into())
                .await
                .unwrap()
            {
                rows.push((
                    s.participant_id.as_str().to_string(),
                    s.scaling,
                    s.completed,
                    s.finish_time,
                    s.rep_count,
                    s.tiebreak_time,
                ));
            }
        }
        rows
    }

    #[tokio::test]
    async fn test_seed_is_deterministic() {
        let config = SeedConfig {
            participants: 8,
            seed: 7,
        };

        let tmp_a = TempDir::new().unwrap();
        let (store_a, service_a) = make_service(&tmp_a);
        seed_competition(&store_a, &service_a, &config).await.unwrap();

        let tmp_b = TempDir::new().unwrap();
        let (store_b, service_b) = make_service(&tmp_b);
        seed_competition(&store_b, &service_b, &config).await.unwrap();

        assert_eq!(seeded_scores(&store_a).await, seeded_scores(&store_b).await);
    }

    #[tokio::test]
    async fn test_seed_assigns_distinct_points() {
        let tmp = TempDir::new().unwrap();
        let (store, service) = make_service(&tmp);

        let report = seed_competition(
            &store,
            &service,
            &SeedConfig {
                participants: 10,
                seed: 42,
            },
        )
        .await
        .unwrap();
        assert!(report.errors.is_empty());

        for workout in ["26.1", "26.2"] {
            let mut points: Vec<u32> = store
                .submissions_for_workout(&workout.into())
                .await
                .unwrap()
                .iter()
                .map(|s| s.ranking_points)
                .collect();
            points.sort_unstable();

            let expected: Vec<u32> = (1..=points.len() as u32).collect();
            assert_eq!(points, expected);
        }
    }

    #[tokio::test]
    async fn test_seed_report_counts() {
        let tmp = TempDir::new().unwrap();
        let (store, service) = make_service(&tmp);

        let report = seed_competition(
            &store,
            &service,
            &SeedConfig {
                participants: 12,
                seed: 3,
            },
        )
        .await
        .unwrap();

        assert_eq!(report.profiles_written, 12);
        assert_eq!(report.workouts_ranked, 2);
        assert!(report.submissions_written > 0);
        // At most one submission per participant per workout
        assert!(report.submissions_written <= 24);
    }
}
