//! Core data models for the leaderboard.

mod clock;
mod ids;
mod leaderboard;
mod profile;
mod submission;
mod tier;
mod workout;

pub use clock::*;
pub use ids::*;
pub use leaderboard::*;
pub use profile::*;
pub use submission::*;
pub use tier::*;
pub use workout::*;
