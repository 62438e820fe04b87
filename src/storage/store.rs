//! File-backed submission and profile store.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::{ParticipantId, ParticipantProfile, ScoreSubmission, SubmissionId, WorkoutId};

use super::{JsonlReader, JsonlWriter, ProfileStore, StorageConfig, StorageError, SubmissionStore};

/// JSONL-file implementation of the store traits.
///
/// Keeps one submissions file per workout plus a global profiles file.
/// Mutations rewrite the workout's whole file; a read/write lock keeps
/// snapshot reads from observing a half-written file.
pub struct JsonlScoreStore {
    config: StorageConfig,
    lock: RwLock<()>,
}

impl JsonlScoreStore {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            lock: RwLock::new(()),
        }
    }

    fn reader(&self, workout_id: &WorkoutId) -> JsonlReader<ScoreSubmission> {
        JsonlReader::new(self.config.submissions_path(workout_id))
    }

    fn writer(&self, workout_id: &WorkoutId) -> JsonlWriter<ScoreSubmission> {
        JsonlWriter::new(self.config.submissions_path(workout_id))
    }

    fn workout_files(&self) -> Result<Vec<PathBuf>, StorageError> {
        let dir = self.config.submissions_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("jsonl") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Insert or replace a profile. Seeding writes profiles this way; the
    /// engine itself only reads them.
    pub async fn upsert_profile(&self, profile: ParticipantProfile) -> Result<(), StorageError> {
        let _guard = self.lock.write().await;

        let reader: JsonlReader<ParticipantProfile> =
            JsonlReader::new(self.config.profiles_path());
        let mut profiles = reader.read_all()?;

        match profiles
            .iter_mut()
            .find(|p| p.participant_id == profile.participant_id)
        {
            Some(existing) => *existing = profile,
            None => profiles.push(profile),
        }

        JsonlWriter::new(self.config.profiles_path()).write_all(&profiles)?;
        Ok(())
    }
}

#[async_trait]
impl SubmissionStore for JsonlScoreStore {
    async fn submissions_for_workout(
        &self,
        workout_id: &WorkoutId,
    ) -> Result<Vec<ScoreSubmission>, StorageError> {
        let _guard = self.lock.read().await;
        self.reader(workout_id).read_all()
    }

    async fn submissions_for_participant(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<Vec<ScoreSubmission>, StorageError> {
        let _guard = self.lock.read().await;

        let mut submissions = Vec::new();
        for path in self.workout_files()? {
            let reader: JsonlReader<ScoreSubmission> = JsonlReader::new(path);
            submissions.extend(reader.read_where(|s| &s.participant_id == participant_id)?);
        }
        Ok(submissions)
    }

    async fn upsert_submission(&self, submission: ScoreSubmission) -> Result<(), StorageError> {
        let _guard = self.lock.write().await;
        let workout_id = submission.workout_id.clone();

        let mut submissions = self.reader(&workout_id).read_all()?;
        match submissions.iter_mut().find(|s| s.id == submission.id) {
            Some(existing) => {
                // Edits keep the original submission time and file slot
                let submitted_at = existing.submitted_at;
                *existing = submission;
                existing.submitted_at = submitted_at;
                self.writer(&workout_id).write_all(&submissions)?;
            }
            None => {
                self.writer(&workout_id).append(&submission)?;
            }
        }

        Ok(())
    }

    async fn delete_submission(
        &self,
        workout_id: &WorkoutId,
        submission_id: &SubmissionId,
    ) -> Result<bool, StorageError> {
        let _guard = self.lock.write().await;

        let mut submissions = self.reader(workout_id).read_all()?;
        let before = submissions.len();
        submissions.retain(|s| &s.id != submission_id);

        if submissions.len() == before {
            return Ok(false);
        }

        self.writer(workout_id).write_all(&submissions)?;
        debug!("Deleted submission {} from {}", submission_id, workout_id);
        Ok(true)
    }

    async fn update_ranking_points(
        &self,
        workout_id: &WorkoutId,
        submission_id: &SubmissionId,
        points: u32,
    ) -> Result<(), StorageError> {
        let _guard = self.lock.write().await;

        let mut submissions = self.reader(workout_id).read_all()?;
        let target = submissions
            .iter_mut()
            .find(|s| &s.id == submission_id)
            .ok_or_else(|| StorageError::SubmissionNotFound(submission_id.clone()))?;

        target.ranking_points = points;
        self.writer(workout_id).write_all(&submissions)?;
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for JsonlScoreStore {
    async fn fetch_profile(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<Option<ParticipantProfile>, StorageError> {
        let _guard = self.lock.read().await;

        let reader: JsonlReader<ParticipantProfile> =
            JsonlReader::new(self.config.profiles_path());
        let profiles = reader.read_all()?;
        Ok(profiles
            .into_iter()
            .find(|p| &p.participant_id == participant_id))
    }
}
