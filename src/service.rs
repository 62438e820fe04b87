//! Ranking orchestration.
//!
//! `RankingService` drives the pure scoring engine over the stores: it
//! reads a submission snapshot, ranks it, writes placement points back
//! record by record, and assembles the display-ready leaderboard views.
//! Write-back failures are collected per record; the in-memory result
//! stays complete either way.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{
    submission_identity, ClockTime, Competition, LeaderboardEntry, ParticipantId, ScoreSubmission,
    WorkoutDefinition, WorkoutId, WorkoutStanding, ANONYMOUS_NAME,
};
use crate::scoring::{normalize, ordinal, overall_standings, rank_workout, score_display, RankError};
use crate::storage::{ProfileStore, StorageError, SubmissionStore};

/// Errors from service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unknown workout: {0}")]
    UnknownWorkout(WorkoutId),

    #[error("no submission for participant {0} in workout {1}")]
    SubmissionNotFound(ParticipantId, WorkoutId),

    #[error("ranking error: {0}")]
    Rank(#[from] RankError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Raw score input, before identity and timestamps are attached.
#[derive(Debug, Clone, Deserialize)]
pub struct NewScore {
    pub participant_id: ParticipantId,
    pub scaling: String,
    pub completed: bool,
    #[serde(default)]
    pub finish_time: Option<String>,
    #[serde(default)]
    pub rep_count: Option<u32>,
    #[serde(default)]
    pub tiebreak_time: Option<String>,
}

/// Result of one workout's ranking pass.
#[derive(Debug, Clone)]
pub struct RankOutcome {
    pub workout_id: WorkoutId,
    pub standings: Vec<WorkoutStanding>,

    /// Per-record point write-back failures, as "submission-id: error"
    /// strings. Standings above are complete even when this is non-empty.
    pub write_errors: Vec<String>,
}

pub struct RankingService {
    competition: Competition,
    store: Arc<dyn SubmissionStore>,
    profiles: Arc<dyn ProfileStore>,
}

impl RankingService {
    pub fn new(
        competition: Competition,
        store: Arc<dyn SubmissionStore>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Self {
        Self {
            competition,
            store,
            profiles,
        }
    }

    pub fn competition(&self) -> &Competition {
        &self.competition
    }

    fn workout(&self, id: &WorkoutId) -> Result<&WorkoutDefinition, ServiceError> {
        self.competition
            .workout(id)
            .ok_or_else(|| ServiceError::UnknownWorkout(id.clone()))
    }

    /// Run a full ranking pass for one workout.
    ///
    /// Ranks the current snapshot, persists each record's points, and
    /// returns the ordered standings. One malformed or inconsistent
    /// record fails the whole pass; one failed point write does not.
    pub async fn refresh_workout(&self, workout_id: &WorkoutId) -> Result<RankOutcome, ServiceError> {
        let workout = self.workout(workout_id)?;
        let snapshot = self.store.submissions_for_workout(workout_id).await?;
        let ranked = rank_workout(workout, &snapshot)?;

        let by_id: HashMap<&str, &ScoreSubmission> =
            snapshot.iter().map(|s| (s.id.as_str(), s)).collect();

        let mut standings = Vec::with_capacity(ranked.len());
        let mut write_errors = Vec::new();

        for row in &ranked {
            let scaling = by_id
                .get(row.score.submission_id.as_str())
                .map(|s| s.scaling.clone())
                .unwrap_or_default();

            standings.push(WorkoutStanding {
                placement: row.points,
                submission_id: row.score.submission_id.clone(),
                participant_id: row.score.participant_id.clone(),
                scaling,
                completed: row.score.completed,
                score_display: score_display(workout, &row.score),
                tiebreak_display: row
                    .score
                    .tiebreak_secs
                    .map(|secs| ClockTime::from_seconds(secs).to_string()),
            });

            if let Err(e) = self
                .store
                .update_ranking_points(workout_id, &row.score.submission_id, row.points)
                .await
            {
                warn!(
                    "Failed to persist points for {}: {}",
                    row.score.submission_id, e
                );
                write_errors.push(format!("{}: {}", row.score.submission_id, e));
            }
        }

        info!(
            "Ranked {}: {} submissions, {} write failures",
            workout_id,
            standings.len(),
            write_errors.len()
        );

        Ok(RankOutcome {
            workout_id: workout_id.clone(),
            standings,
            write_errors,
        })
    }

    /// Run ranking passes for every workout in programme order.
    ///
    /// Each workout's pass fails or succeeds on its own; one workout's
    /// bad record does not block the others.
    pub async fn refresh_all(&self) -> Vec<(WorkoutId, Result<RankOutcome, ServiceError>)> {
        let mut outcomes = Vec::with_capacity(self.competition.workouts.len());
        for workout in &self.competition.workouts {
            let outcome = self.refresh_workout(&workout.id).await;
            if let Err(e) = &outcome {
                warn!("Ranking pass for {} failed: {}", workout.id, e);
            }
            outcomes.push((workout.id.clone(), outcome));
        }
        outcomes
    }

    /// Store a new or edited score and re-rank its workout.
    ///
    /// The score is validated against the workout definition before it
    /// touches the store, so a bad submission is rejected here instead of
    /// poisoning every later ranking pass.
    pub async fn submit_score(
        &self,
        workout_id: &WorkoutId,
        score: NewScore,
    ) -> Result<RankOutcome, ServiceError> {
        let workout = self.workout(workout_id)?;

        let mut submission = ScoreSubmission::new(
            score.participant_id,
            workout_id.clone(),
            score.scaling,
            score.completed,
        );
        submission.finish_time = score.finish_time;
        submission.rep_count = score.rep_count;
        submission.tiebreak_time = score.tiebreak_time;

        normalize(workout, &submission)?;

        self.store.upsert_submission(submission).await?;
        self.refresh_workout(workout_id).await
    }

    /// Remove a participant's score from a workout and re-rank it.
    pub async fn withdraw(
        &self,
        workout_id: &WorkoutId,
        participant_id: &ParticipantId,
    ) -> Result<RankOutcome, ServiceError> {
        self.workout(workout_id)?;

        let submission_id = submission_identity(participant_id, workout_id);
        let deleted = self
            .store
            .delete_submission(workout_id, &submission_id)
            .await?;
        if !deleted {
            return Err(ServiceError::SubmissionNotFound(
                participant_id.clone(),
                workout_id.clone(),
            ));
        }

        self.refresh_workout(workout_id).await
    }

    /// Build the overall leaderboard from stored ranking points.
    ///
    /// Uses the points already on disk rather than re-ranking, so the
    /// board reflects the last successful pass per workout. Participants
    /// without a profile show as "Anonymous".
    pub async fn overall_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ServiceError> {
        let mut per_workout = Vec::with_capacity(self.competition.workouts.len());
        for workout in &self.competition.workouts {
            let snapshot = self.store.submissions_for_workout(&workout.id).await?;

            let mut ranked: Vec<&ScoreSubmission> =
                snapshot.iter().filter(|s| s.is_ranked()).collect();
            ranked.sort_by_key(|s| s.ranking_points);

            let placements: Vec<(ParticipantId, u32)> = ranked
                .into_iter()
                .map(|s| (s.participant_id.clone(), s.ranking_points))
                .collect();
            per_workout.push((workout.id.clone(), placements));
        }

        let standings = overall_standings(&per_workout);

        let mut entries = Vec::with_capacity(standings.len());
        for standing in standings {
            let display_name = match self.profiles.fetch_profile(&standing.participant_id).await {
                Ok(Some(profile)) => profile.display_name,
                Ok(None) => ANONYMOUS_NAME.to_string(),
                Err(e) => {
                    warn!(
                        "Profile lookup failed for {}: {}",
                        standing.participant_id, e
                    );
                    ANONYMOUS_NAME.to_string()
                }
            };

            let placements = standing
                .placements
                .iter()
                .map(|(workout_id, points)| (workout_id.clone(), ordinal(*points)))
                .collect();

            entries.push(LeaderboardEntry {
                overall_placement: standing.overall_placement,
                participant_id: standing.participant_id,
                display_name,
                total_points: standing.total_points,
                placements,
            });
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ParticipantProfile, RepLadder, ScoringMode, SubmissionId};
    use crate::storage::{JsonlScoreStore, StorageConfig};
    use async_trait::async_trait;
    use tempfile::TempDir;

    fn open_competition() -> Competition {
        Competition::new("Test Open".to_string())
            .with_workout(
                WorkoutDefinition::new(
                    "26.1".into(),
                    "Open 26.1".to_string(),
                    ScoringMode::RepsBased,
                )
                .with_time_cap("15:00".parse().unwrap())
                .with_rep_ladder(RepLadder::new(3, 5)),
            )
            .with_workout(
                WorkoutDefinition::new(
                    "26.2".into(),
                    "Open 26.2".to_string(),
                    ScoringMode::TimeBased,
                )
                .with_time_cap("12:00".parse().unwrap()),
            )
    }

    fn make_service(tmp: &TempDir) -> (Arc<JsonlScoreStore>, RankingService) {
        let store = Arc::new(JsonlScoreStore::new(StorageConfig::new(
            tmp.path().to_path_buf(),
        )));
        let service = RankingService::new(open_competition(), store.clone(), store.clone());
        (store, service)
    }

    fn time_score(participant: &str, finish: &str) -> NewScore {
        NewScore {
            participant_id: participant.into(),
            scaling: "RX".to_string(),
            completed: true,
            finish_time: Some(finish.to_string()),
            rep_count: None,
            tiebreak_time: None,
        }
    }

    fn capped_score(participant: &str, reps: u32) -> NewScore {
        NewScore {
            participant_id: participant.into(),
            scaling: "RX".to_string(),
            completed: false,
            finish_time: None,
            rep_count: Some(reps),
            tiebreak_time: None,
        }
    }

    #[tokio::test]
    async fn test_submit_ranks_and_persists_points() {
        let tmp = TempDir::new().unwrap();
        let (store, service) = make_service(&tmp);

        service
            .submit_score(&"26.2".into(), time_score("athlete-001", "11:30"))
            .await
            .unwrap();
        service
            .submit_score(&"26.2".into(), time_score("athlete-002", "10:15"))
            .await
            .unwrap();
        let outcome = service
            .submit_score(&"26.2".into(), time_score("athlete-003", "10:45"))
            .await
            .unwrap();

        let order: Vec<&str> = outcome
            .standings
            .iter()
            .map(|s| s.participant_id.as_str())
            .collect();
        assert_eq!(order, vec!["athlete-002", "athlete-003", "athlete-001"]);
        assert_eq!(outcome.standings[0].placement, 1);
        assert_eq!(outcome.standings[0].score_display, "10:15");
        assert!(outcome.write_errors.is_empty());

        let stored = store
            .submissions_for_workout(&"26.2".into())
            .await
            .unwrap();
        let points_for = |participant: &str| {
            stored
                .iter()
                .find(|s| s.participant_id.as_str() == participant)
                .map(|s| s.ranking_points)
                .unwrap()
        };
        assert_eq!(points_for("athlete-002"), 1);
        assert_eq!(points_for("athlete-003"), 2);
        assert_eq!(points_for("athlete-001"), 3);
    }

    #[tokio::test]
    async fn test_submit_rejects_malformed_duration() {
        let tmp = TempDir::new().unwrap();
        let (store, service) = make_service(&tmp);

        let err = service
            .submit_score(&"26.2".into(), time_score("athlete-001", "12m34"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Rank(RankError::MalformedDuration { .. })
        ));

        let stored = store
            .submissions_for_workout(&"26.2".into())
            .await
            .unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn test_submit_rejects_inconsistent_flags() {
        let tmp = TempDir::new().unwrap();
        let (_, service) = make_service(&tmp);

        let mut score = time_score("athlete-001", "11:30");
        score.finish_time = None;

        let err = service
            .submit_score(&"26.2".into(), score)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Rank(RankError::InconsistentSubmission { .. })
        ));
    }

    #[tokio::test]
    async fn test_resubmission_replaces_previous_score() {
        let tmp = TempDir::new().unwrap();
        let (_, service) = make_service(&tmp);

        service
            .submit_score(&"26.2".into(), time_score("athlete-001", "11:00"))
            .await
            .unwrap();
        let outcome = service
            .submit_score(&"26.2".into(), time_score("athlete-001", "10:30"))
            .await
            .unwrap();

        assert_eq!(outcome.standings.len(), 1);
        assert_eq!(outcome.standings[0].score_display, "10:30");
    }

    #[tokio::test]
    async fn test_withdraw_removes_and_reranks() {
        let tmp = TempDir::new().unwrap();
        let (_, service) = make_service(&tmp);

        service
            .submit_score(&"26.2".into(), time_score("athlete-001", "11:30"))
            .await
            .unwrap();
        service
            .submit_score(&"26.2".into(), time_score("athlete-002", "10:15"))
            .await
            .unwrap();

        let outcome = service
            .withdraw(&"26.2".into(), &"athlete-002".into())
            .await
            .unwrap();
        assert_eq!(outcome.standings.len(), 1);
        assert_eq!(outcome.standings[0].participant_id.as_str(), "athlete-001");
        assert_eq!(outcome.standings[0].placement, 1);

        let err = service
            .withdraw(&"26.2".into(), &"athlete-002".into())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::SubmissionNotFound(_, _)));
    }

    #[tokio::test]
    async fn test_unknown_workout() {
        let tmp = TempDir::new().unwrap();
        let (_, service) = make_service(&tmp);

        let err = service.refresh_workout(&"99.9".into()).await.unwrap_err();
        assert!(matches!(err, ServiceError::UnknownWorkout(_)));
    }

    #[tokio::test]
    async fn test_overall_leaderboard_sums_participated_workouts_only() {
        let tmp = TempDir::new().unwrap();
        let (store, service) = make_service(&tmp);

        // 26.1: athlete-001 1st, athlete-002 2nd, athlete-003 3rd
        service
            .submit_score(&"26.1".into(), capped_score("athlete-001", 120))
            .await
            .unwrap();
        service
            .submit_score(&"26.1".into(), capped_score("athlete-002", 90))
            .await
            .unwrap();
        service
            .submit_score(&"26.1".into(), capped_score("athlete-003", 60))
            .await
            .unwrap();

        // 26.2: athlete-001 1st, athlete-002 2nd; athlete-003 skips
        service
            .submit_score(&"26.2".into(), time_score("athlete-001", "10:00"))
            .await
            .unwrap();
        service
            .submit_score(&"26.2".into(), time_score("athlete-002", "11:00"))
            .await
            .unwrap();

        store
            .upsert_profile(ParticipantProfile::new(
                "athlete-001".into(),
                "Alex Doe".to_string(),
            ))
            .await
            .unwrap();

        let board = service.overall_leaderboard().await.unwrap();
        assert_eq!(board.len(), 3);

        // Totals: athlete-001 = 2, athlete-003 = 3 (one workout), athlete-002 = 4
        assert_eq!(board[0].participant_id.as_str(), "athlete-001");
        assert_eq!(board[0].display_name, "Alex Doe");
        assert_eq!(board[0].total_points, 2);
        assert_eq!(board[0].overall_placement, 1);
        assert_eq!(board[0].placements.get("26.1"), Some(&"1st".to_string()));

        assert_eq!(board[1].participant_id.as_str(), "athlete-003");
        assert_eq!(board[1].display_name, ANONYMOUS_NAME);
        assert_eq!(board[1].total_points, 3);
        assert!(!board[1].placements.contains_key("26.2"));

        assert_eq!(board[2].participant_id.as_str(), "athlete-002");
        assert_eq!(board[2].total_points, 4);
        assert_eq!(board[2].overall_placement, 3);
    }

    #[tokio::test]
    async fn test_refresh_all_isolates_workout_failures() {
        let tmp = TempDir::new().unwrap();
        let (store, service) = make_service(&tmp);

        // Malformed record written straight to the store, dodging submit
        // validation the way hand-edited data would
        store
            .upsert_submission(
                ScoreSubmission::new(
                    "athlete-001".into(),
                    "26.1".into(),
                    "RX".to_string(),
                    false,
                )
                .with_rep_count(90)
                .with_tiebreak("4m10"),
            )
            .await
            .unwrap();

        service
            .submit_score(&"26.2".into(), time_score("athlete-002", "11:00"))
            .await
            .unwrap();

        let outcomes = service.refresh_all().await;
        assert_eq!(outcomes.len(), 2);

        assert_eq!(outcomes[0].0.as_str(), "26.1");
        assert!(matches!(
            outcomes[0].1,
            Err(ServiceError::Rank(RankError::MalformedDuration { .. }))
        ));

        assert_eq!(outcomes[1].0.as_str(), "26.2");
        let ok = outcomes[1].1.as_ref().unwrap();
        assert_eq!(ok.standings.len(), 1);
    }

    /// Store wrapper that fails point write-backs for one submission.
    struct FlakyPointsStore {
        inner: Arc<JsonlScoreStore>,
        fail_for: SubmissionId,
    }

    #[async_trait]
    impl SubmissionStore for FlakyPointsStore {
        async fn submissions_for_workout(
            &self,
            workout_id: &WorkoutId,
        ) -> Result<Vec<ScoreSubmission>, StorageError> {
            self.inner.submissions_for_workout(workout_id).await
        }

        async fn submissions_for_participant(
            &self,
            participant_id: &ParticipantId,
        ) -> Result<Vec<ScoreSubmission>, StorageError> {
            self.inner.submissions_for_participant(participant_id).await
        }

        async fn upsert_submission(
            &self,
            submission: ScoreSubmission,
        ) -> Result<(), StorageError> {
            self.inner.upsert_submission(submission).await
        }

        async fn delete_submission(
            &self,
            workout_id: &WorkoutId,
            submission_id: &SubmissionId,
        ) -> Result<bool, StorageError> {
            self.inner.delete_submission(workout_id, submission_id).await
        }

        async fn update_ranking_points(
            &self,
            workout_id: &WorkoutId,
            submission_id: &SubmissionId,
            points: u32,
        ) -> Result<(), StorageError> {
            if submission_id == &self.fail_for {
                return Err(StorageError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "disk full",
                )));
            }
            self.inner
                .update_ranking_points(workout_id, submission_id, points)
                .await
        }
    }

    #[tokio::test]
    async fn test_point_write_failures_reported_per_record() {
        let tmp = TempDir::new().unwrap();
        let inner = Arc::new(JsonlScoreStore::new(StorageConfig::new(
            tmp.path().to_path_buf(),
        )));
        let fail_for = submission_identity(&"athlete-002".into(), &"26.2".into());
        let flaky = Arc::new(FlakyPointsStore {
            inner: inner.clone(),
            fail_for: fail_for.clone(),
        });
        let service = RankingService::new(open_competition(), flaky, inner.clone());

        service
            .submit_score(&"26.2".into(), time_score("athlete-001", "11:30"))
            .await
            .unwrap();
        let outcome = service
            .submit_score(&"26.2".into(), time_score("athlete-002", "10:15"))
            .await
            .unwrap();

        // Both rows ranked; only the write-back for athlete-002 failed
        assert_eq!(outcome.standings.len(), 2);
        assert_eq!(outcome.standings[0].participant_id.as_str(), "athlete-002");
        assert_eq!(outcome.write_errors.len(), 1);
        assert!(outcome.write_errors[0].contains(fail_for.as_str()));

        let stored = inner
            .submissions_for_workout(&"26.2".into())
            .await
            .unwrap();
        let flaky_row = stored.iter().find(|s| s.id == fail_for).unwrap();
        assert_eq!(flaky_row.ranking_points, 0);
    }
}
