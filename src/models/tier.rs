//! Scaling tier classification.

use serde::{Deserialize, Serialize};

/// Scaling tier of a submission, best first.
///
/// Tier labels arrive as free-form strings; anything unrecognized falls
/// into `Other` and sorts behind every known tier rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalingTier {
    Rx,
    Scaled,
    Foundations,
    Other,
}

impl ScalingTier {
    /// Classify a raw tier label.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("rx") {
            ScalingTier::Rx
        } else if label.eq_ignore_ascii_case("scaled") {
            ScalingTier::Scaled
        } else if label.eq_ignore_ascii_case("foundations") {
            ScalingTier::Foundations
        } else {
            ScalingTier::Other
        }
    }

    /// Comparison weight, lower is better.
    pub fn rank(&self) -> u8 {
        match self {
            ScalingTier::Rx => 1,
            ScalingTier::Scaled => 2,
            ScalingTier::Foundations => 3,
            ScalingTier::Other => 99,
        }
    }
}

impl std::fmt::Display for ScalingTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalingTier::Rx => write!(f, "RX"),
            ScalingTier::Scaled => write!(f, "Scaled"),
            ScalingTier::Foundations => write!(f, "Foundations"),
            ScalingTier::Other => write!(f, "Other"),
        }
    }
}
