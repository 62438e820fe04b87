//! Clock-style durations in `minutes:seconds` form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a duration string is not valid `minutes:seconds`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed duration {value:?} (expected minutes:seconds)")]
pub struct ClockParseError {
    pub value: String,
}

impl ClockParseError {
    fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }
}

/// A duration entered on a clock, e.g. "12:34" for twelve minutes
/// thirty-four seconds. Stored as total seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u32);

impl ClockTime {
    /// Build from a total number of seconds.
    pub fn from_seconds(secs: u32) -> Self {
        Self(secs)
    }

    /// Total duration in seconds.
    pub fn total_seconds(&self) -> u32 {
        self.0
    }
}

impl FromStr for ClockTime {
    type Err = ClockParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (minutes, seconds) = trimmed
            .split_once(':')
            .ok_or_else(|| ClockParseError::new(s))?;

        let minutes: u32 = minutes.parse().map_err(|_| ClockParseError::new(s))?;
        let seconds: u32 = seconds.parse().map_err(|_| ClockParseError::new(s))?;
        if seconds >= 60 {
            return Err(ClockParseError::new(s));
        }

        Ok(Self(minutes * 60 + seconds))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ClockParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.to_string()
    }
}
