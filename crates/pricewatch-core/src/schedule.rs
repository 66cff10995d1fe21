//! Daily trigger times for scheduled scrape runs.
//!
//! A [`TriggerTime`] is a wall-clock time of day; the time zone it is read in
//! comes from [`crate::AppConfig::timezone`]. The scheduler consumes the
//! six-field cron expression produced by [`TriggerTime::cron_expression`].

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TriggerTime(NaiveTime);

impl TriggerTime {
    /// Builds a trigger time from an hour (0–23) and minute (0–59).
    ///
    /// Returns `None` when either component is out of range.
    #[must_use]
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    #[must_use]
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    #[must_use]
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Cron expression (`sec min hour dom month dow`) firing once a day at
    /// this time.
    #[must_use]
    pub fn cron_expression(&self) -> String {
        format!("0 {} {} * * *", self.minute(), self.hour())
    }
}

impl FromStr for TriggerTime {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M").map(Self)
    }
}

impl fmt::Display for TriggerTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parses a comma-separated list of `HH:MM` values.
///
/// Blank entries (e.g. from a trailing comma) are ignored. An empty result is
/// an error since a scheduler with no triggers would never run.
///
/// # Errors
///
/// Returns a human-readable reason naming the first entry that fails to parse,
/// or stating that the list is empty.
pub fn parse_trigger_times(raw: &str) -> Result<Vec<TriggerTime>, String> {
    let times = raw
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<TriggerTime>()
                .map_err(|e| format!("\"{entry}\" is not a HH:MM time: {e}"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if times.is_empty() {
        return Err("at least one trigger time is required".to_string());
    }
    Ok(times)
}
