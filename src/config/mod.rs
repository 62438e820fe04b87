//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::models::{ClockTime, Competition, RepLadder, ScoringMode, WorkoutDefinition};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,

    /// Competition programme. Fixed for the life of the process; edits
    /// take effect on restart.
    #[serde(default = "default_competition")]
    pub competition: Competition,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Built-in three-workout programme used when the config file carries no
/// `[competition]` section.
fn default_competition() -> Competition {
    Competition::new("Open 2026".to_string())
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
        .with_workout(
            WorkoutDefinition::new(
                "26.3".into(),
                "Open 26.3".to_string(),
                ScoringMode::TimeBased,
            )
            .with_time_cap(ClockTime::from_seconds(9 * 60)),
        )
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            server: ServerConfig::default(),
            competition: default_competition(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for workout in &self.competition.workouts {
            if !seen.insert(workout.id.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "Duplicate workout ID: {}",
                    workout.id
                )));
            }

            if let Some(ladder) = workout.rep_ladder {
                if ladder.step == 0 && ladder.offset == 0 {
                    return Err(ConfigError::ValidationError(format!(
                        "Workout {} has an all-zero rep ladder",
                        workout.id
                    )));
                }
            }
        }

        Ok(())
    }
}
