//! Filesystem document store.
//!
//! Submissions and profiles live in local JSONL files:
//! - One submissions file per workout
//! - One global profiles file
//!
//! The engine talks to storage through the `SubmissionStore` and
//! `ProfileStore` traits; `JsonlScoreStore` is the file-backed
//! implementation.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ParticipantId, ParticipantProfile, ScoreSubmission, SubmissionId, WorkoutId};

pub mod jsonl;
pub mod store;

pub use jsonl::{JsonlReader, JsonlWriter};
pub use store::JsonlScoreStore;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Submission not found: {0}")]
    SubmissionNotFound(SubmissionId),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn submissions_dir(&self) -> PathBuf {
        self.data_dir.join("submissions")
    }

    pub fn submissions_path(&self, workout_id: &WorkoutId) -> PathBuf {
        self.submissions_dir()
            .join(format!("{}.jsonl", workout_id.as_str()))
    }

    pub fn profiles_path(&self) -> PathBuf {
        self.data_dir.join("profiles.jsonl")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

/// Persistence interface for score submissions.
///
/// Read methods return a consistent snapshot: one full query result, not
/// a stream. Ranking passes depend on that.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// All submissions for one workout, in stored order.
    async fn submissions_for_workout(
        &self,
        workout_id: &WorkoutId,
    ) -> Result<Vec<ScoreSubmission>, StorageError>;

    /// All submissions by one participant across workouts.
    async fn submissions_for_participant(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<Vec<ScoreSubmission>, StorageError>;

    /// Insert or replace by submission ID.
    async fn upsert_submission(&self, submission: ScoreSubmission) -> Result<(), StorageError>;

    /// Remove a submission. Returns false if it did not exist.
    async fn delete_submission(
        &self,
        workout_id: &WorkoutId,
        submission_id: &SubmissionId,
    ) -> Result<bool, StorageError>;

    /// Write back one submission's ranking points after a pass.
    async fn update_ranking_points(
        &self,
        workout_id: &WorkoutId,
        submission_id: &SubmissionId,
        points: u32,
    ) -> Result<(), StorageError>;
}

/// Read-only lookup of participant display data.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch a profile if one exists. `None` is normal, not an error.
    async fn fetch_profile(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<Option<ParticipantProfile>, StorageError>;
}
