use std::fmt::Display;

use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;
use thiserror::Error;

/// Upstream times come as `HH:MM:SS` or any prefix of it.
const TIME_PLACEHOLDER: &str = "00:00:00";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Largest delay (in minutes) still counted as a minor delay.
pub const MINOR_DELAY_LIMIT: i64 = 3;

#[derive(Error, Debug)]
pub enum TimeError {
    #[error("Time {0:?} is longer than HH:MM:SS")]
    TooLong(String),
    #[error("Invalid date time {input:?}: {source}")]
    Invalid {
        input: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Parses an upstream date (`YYYY-MM-DD`) and time (`HH:MM:SS`, `HH:MM` or
/// shorter) into a local timestamp.
pub fn parse_timestamp(date: &str, time: &str) -> Result<NaiveDateTime, TimeError> {
    let time = time.trim();
    if time.len() > TIME_PLACEHOLDER.len() {
        return Err(TimeError::TooLong(time.to_string()));
    }
    let input = format!(
        "{} {}{}",
        date.trim(),
        time,
        &TIME_PLACEHOLDER[time.len()..]
    );
    NaiveDateTime::parse_from_str(&input, DATE_TIME_FORMAT)
        .map_err(|source| TimeError::Invalid { input, source })
}

pub fn format_duration(minutes: i64) -> String {
    if minutes >= 60 {
        format!("{}h{:02}m", minutes / 60, minutes % 60)
    } else {
        format!("{minutes}m")
    }
}

/// Upstream times are wall-clock values, so a naive timestamp is already local.
pub fn format_clock(time: &NaiveDateTime) -> String {
    time.format("%H:%M").to_string()
}

/// Whole minutes from `from` to `to`, truncated toward zero.
pub fn minutes_between(from: &NaiveDateTime, to: &NaiveDateTime) -> i64 {
    (*to - *from).num_minutes()
}

pub fn minutes(minutes: u32) -> TimeDelta {
    TimeDelta::minutes(minutes as i64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DelaySeverity {
    Unknown,
    OnTime,
    Minor,
    Major,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayStatus {
    /// The feed carries no live estimate for this departure.
    NoRealtime,
    OnTime,
    Minor(i64),
    Major(i64),
}

impl DelayStatus {
    pub fn classify(scheduled: &NaiveDateTime, realtime: Option<&NaiveDateTime>) -> Self {
        let Some(realtime) = realtime else {
            return Self::NoRealtime;
        };
        // Buckets compare exact seconds; the carried minutes are truncated.
        let delay = *realtime - *scheduled;
        match delay.num_seconds() {
            secs if secs <= 0 => Self::OnTime,
            secs if secs <= MINOR_DELAY_LIMIT * 60 => Self::Minor(delay.num_minutes()),
            _ => Self::Major(delay.num_minutes()),
        }
    }

    pub fn severity(&self) -> DelaySeverity {
        match self {
            Self::NoRealtime => DelaySeverity::Unknown,
            Self::OnTime => DelaySeverity::OnTime,
            Self::Minor(_) => DelaySeverity::Minor,
            Self::Major(_) => DelaySeverity::Major,
        }
    }

    pub fn minutes(&self) -> i64 {
        match self {
            Self::Minor(diff) | Self::Major(diff) => *diff,
            Self::NoRealtime | Self::OnTime => 0,
        }
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl Display for DelayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoRealtime => f.write_str("no realtime"),
            Self::OnTime => f.write_str("on time"),
            Self::Minor(diff) | Self::Major(diff) => write!(f, "+{diff} min"),
        }
    }
}

#[test]
fn pads_short_time() {
    let time = parse_timestamp("2024-03-01", "08:15").unwrap();
    assert_eq!(format_clock(&time), "08:15");
}

#[test]
fn pads_hour_only() {
    let time = parse_timestamp("2024-03-01", "23").unwrap();
    assert_eq!(format_clock(&time), "23:00");
}

#[test]
fn rejects_long_time() {
    assert!(matches!(
        parse_timestamp("2024-03-01", "08:15:00:00"),
        Err(TimeError::TooLong(_))
    ));
}

#[test]
fn minutes_truncate() {
    let from = parse_timestamp("2024-03-01", "08:00:00").unwrap();
    let to = parse_timestamp("2024-03-01", "08:02:59").unwrap();
    assert_eq!(minutes_between(&from, &to), 2);
}
