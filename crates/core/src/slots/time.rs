//! Clock-time primitives for `HH:MM` strings.
//!
//! Parsing is deliberately lenient about magnitudes: `"99:99"` parses to
//! hour 99, minute 99. Only [`add_minutes`] needs a real clock time, since it
//! has to land on one.

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::SlotError;

pub const MINUTES_PER_HOUR: i64 = 60;
pub const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: i64,
    pub minute: i64,
}

impl TimeOfDay {
    pub fn new(hour: i64, minute: i64) -> Self {
        Self { hour, minute }
    }

    /// Minutes elapsed since midnight, `hour * 60 + minute`.
    pub fn minutes_since_midnight(&self) -> i64 {
        self.hour
            .saturating_mul(MINUTES_PER_HOUR)
            .saturating_add(self.minute)
    }

    /// Converts to a wall-clock time, `None` when the fields are out of range.
    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        let hour = u32::try_from(self.hour).ok()?;
        let minute = u32::try_from(self.minute).ok()?;
        NaiveTime::from_hms_opt(hour, minute, 0)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_time_of_day(self.hour, self.minute))
    }
}

impl std::str::FromStr for TimeOfDay {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time_of_day(s)
    }
}

/// A service window on a single day. An end before the start means the
/// window runs past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeWindow {
    pub fn parse(start: &str, end: &str) -> Result<Self, SlotError> {
        Ok(Self {
            start: parse_time_of_day(start)?,
            end: parse_time_of_day(end)?,
        })
    }

    pub fn total_minutes(&self) -> i64 {
        let minutes = self
            .end
            .minutes_since_midnight()
            .saturating_sub(self.start.minutes_since_midnight());
        if minutes < 0 {
            minutes + MINUTES_PER_DAY
        } else {
            minutes
        }
    }
}

/// Parses `"H:MM"` / `"HH:MM"` into hour and minute.
///
/// Exactly two colon-separated fields are required and both must parse as
/// integers. No bounds check is applied to either value.
pub fn parse_time_of_day(s: &str) -> Result<TimeOfDay, SlotError> {
    let invalid = || SlotError::InvalidTimeFormat(s.to_string());

    let mut fields = s.split(':');
    let (Some(hour), Some(minute), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(invalid());
    };

    let hour = hour.trim().parse::<i64>().map_err(|_| invalid())?;
    let minute = minute.trim().parse::<i64>().map_err(|_| invalid())?;

    Ok(TimeOfDay { hour, minute })
}

pub fn format_time_of_day(hour: i64, minute: i64) -> String {
    format!("{:02}:{:02}", hour, minute)
}

/// Length of the window from `start` to `end` in minutes, wrapping once past
/// midnight when `end` is earlier than `start`.
pub fn total_minutes(start: &str, end: &str) -> Result<i64, SlotError> {
    Ok(TimeWindow::parse(start, end)?.total_minutes())
}

/// Offsets a clock time by `minutes` (which may be negative or span several
/// days) and renders the result as `HH:MM`.
pub fn add_minutes(time: &str, minutes: i64) -> Result<String, SlotError> {
    let clock = parse_time_of_day(time)?
        .to_naive_time()
        .ok_or_else(|| SlotError::InvalidTimeFormat(time.to_string()))?;

    let (shifted, _) =
        clock.overflowing_add_signed(Duration::minutes(minutes.rem_euclid(MINUTES_PER_DAY)));

    Ok(format_time_of_day(
        i64::from(shifted.hour()),
        i64::from(shifted.minute()),
    ))
}
