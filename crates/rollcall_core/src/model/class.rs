//! Class schedule model and wall-clock time window parsing.
//!
//! # Responsibility
//! - Define the catalog entry describing one schedulable class.
//! - Parse the seed catalog's 12-hour display window into typed times.
//!
//! # Invariants
//! - `id` is opaque and stable for the process lifetime.
//! - A window's end never precedes its start.
//! - Windows carry no date component; classification anchors them to the
//!   current day at evaluation time.

use crate::geo::Coordinate;
use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque class identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ClassId = String;

static CLOCK_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(\d{1,2}):(\d{2})\s*(AM|PM)\s*$").expect("valid clock time regex")
});

/// Time window parsing and validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeWindowError {
    /// Input does not look like `"<start> - <end>"`.
    MalformedWindow(String),
    /// One side does not match the `HH:MM AM|PM` shape.
    MalformedTime(String),
    /// Hour/minute digits parsed but describe no valid clock reading.
    InvalidClockTime { hour: u32, minute: u32 },
    /// Window end precedes its start.
    ReversedWindow { start: NaiveTime, end: NaiveTime },
}

impl Display for TimeWindowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedWindow(value) => {
                write!(f, "time window `{value}` is not `<start> - <end>`")
            }
            Self::MalformedTime(value) => {
                write!(f, "clock time `{value}` is not `HH:MM AM|PM`")
            }
            Self::InvalidClockTime { hour, minute } => {
                write!(f, "clock reading {hour}:{minute:02} does not exist")
            }
            Self::ReversedWindow { start, end } => {
                write!(f, "window end {end} precedes start {start}")
            }
        }
    }
}

impl Error for TimeWindowError {}

/// Start/end wall-clock times for one class session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    /// Builds a window, rejecting reversed start/end pairs.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, TimeWindowError> {
        if end < start {
            return Err(TimeWindowError::ReversedWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses the catalog display form, e.g. `"09:00 AM - 10:30 AM"`.
    pub fn parse(value: &str) -> Result<Self, TimeWindowError> {
        let (start_text, end_text) = value
            .split_once(" - ")
            .ok_or_else(|| TimeWindowError::MalformedWindow(value.to_string()))?;
        Self::new(parse_clock_time(start_text)?, parse_clock_time(end_text)?)
    }
}

impl Display for TimeWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%I:%M %p"),
            self.end.format("%I:%M %p")
        )
    }
}

fn parse_clock_time(value: &str) -> Result<NaiveTime, TimeWindowError> {
    let captures = CLOCK_TIME_RE
        .captures(value)
        .ok_or_else(|| TimeWindowError::MalformedTime(value.to_string()))?;

    // Digit-only captures; parse cannot fail, range still can.
    let hour: u32 = captures[1].parse().unwrap_or(u32::MAX);
    let minute: u32 = captures[2].parse().unwrap_or(u32::MAX);
    if !(1..=12).contains(&hour) || minute > 59 {
        return Err(TimeWindowError::InvalidClockTime { hour, minute });
    }

    let meridiem = captures[3].to_ascii_uppercase();
    let hour24 = match (hour, meridiem.as_str()) {
        (12, "AM") => 0,
        (12, "PM") => 12,
        (h, "AM") => h,
        (h, _) => h + 12,
    };

    NaiveTime::from_hms_opt(hour24, minute, 0)
        .ok_or(TimeWindowError::InvalidClockTime { hour, minute })
}

/// Catalog entry for one schedulable class.
///
/// Seeded at startup and immutable thereafter; the core exposes no
/// create/update/delete path for classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSchedule {
    /// Stable opaque ID referenced by attendance records.
    pub id: ClassId,
    /// Display name, no invariants.
    pub name: String,
    /// Human-readable room/building label, display-only.
    pub location: String,
    /// Lecturer display name, display-only.
    pub lecturer: String,
    /// Wall-clock session window anchored to "today" at evaluation time.
    pub window: TimeWindow,
    /// Physical location submissions are fence-checked against.
    pub anchor: Coordinate,
}
