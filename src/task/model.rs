//! Task data model

use chrono::{NaiveTime, Timelike};
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use super::error::{Result, TaskError};

/// Strict `HH:MM` check: one or two hour digits (0-23), exactly two minute digits.
static STRICT_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[01]?[0-9]|2[0-3]):[0-5][0-9]$").unwrap());

/// Local wall-clock time of day with minute precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Build from hour and minute, `None` when out of range
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parse a strict `HH:MM` token (leading zero on the hour is optional)
    pub fn parse(s: &str) -> Result<Self> {
        if !STRICT_TIME_RE.is_match(s) {
            return Err(TaskError::InvalidTime(s.to_string()));
        }

        let invalid = || TaskError::InvalidTime(s.to_string());
        let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
        let hour = hour.parse().map_err(|_| invalid())?;
        let minute = minute.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).ok_or_else(invalid)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl FromStr for TimeOfDay {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single reminder: when it fires and what it says.
///
/// Tasks are immutable once built. Equality and hashing cover both fields, so
/// two lines with the same time and text are the same task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Task {
    time: TimeOfDay,
    description: String,
}

impl Task {
    /// Build a task from a time token and a description.
    ///
    /// Only the time is validated here; the description is trimmed but may
    /// be empty. Rejecting incomplete lines is the parser's job.
    pub fn new(time_str: &str, description: &str) -> Result<Self> {
        Ok(Self {
            time: TimeOfDay::parse(time_str)?,
            description: description.trim().to_string(),
        })
    }

    pub fn time(&self) -> TimeOfDay {
        self.time
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Due once `now` reaches the task's minute; stays due until dispatched
    pub fn should_notify(&self, now: NaiveTime) -> bool {
        now >= self.time.as_naive()
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.time, self.description)
    }
}
