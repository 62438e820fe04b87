//! Participant profile model.

use serde::{Deserialize, Serialize};

use super::ParticipantId;

/// Display name used when no profile exists for a participant.
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// Display-side participant data. Read-only from the engine's point of
/// view; a missing profile is never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantProfile {
    pub participant_id: ParticipantId,
    pub display_name: String,
    pub category: Option<String>,
    pub photo_ref: Option<String>,
}

impl ParticipantProfile {
    pub fn new(participant_id: ParticipantId, display_name: String) -> Self {
        Self {
            participant_id,
            display_name,
            category: None,
            photo_ref: None,
        }
    }

    /// Builder method to set the category.
    pub fn with_category(mut self, category: String) -> Self {
        self.category = Some(category);
        self
    }

    /// Builder method to set the photo reference.
    pub fn with_photo_ref(mut self, photo_ref: String) -> Self {
        self.photo_ref = Some(photo_ref);
        self
    }

    /// Placeholder profile for participants without one.
    pub fn anonymous(participant_id: ParticipantId) -> Self {
        Self::new(participant_id, ANONYMOUS_NAME.to_string())
    }
}
