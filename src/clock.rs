//! Wall-clock helpers: 12-hour parsing and display, overnight durations

use crate::error::ClockError;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MINUTES_PER_DAY: i64 = 1440;

/// Half of the 12-hour clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
}

impl Period {
    /// Convert a 12-hour display hour (1-12) to a 24-hour hour (0-23)
    pub fn to_24_hour(&self, hour: u32) -> u32 {
        match (self, hour) {
            (Period::Am, 12) => 0,
            (Period::Pm, 12) => 12,
            (Period::Am, h) => h,
            (Period::Pm, h) => h + 12,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Am => write!(f, "AM"),
            Period::Pm => write!(f, "PM"),
        }
    }
}

impl std::str::FromStr for Period {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AM" | "A.M." => Ok(Period::Am),
            "PM" | "P.M." => Ok(Period::Pm),
            _ => Err(ClockError::InvalidPeriod(s.to_string())),
        }
    }
}

/// Parse a display time such as `7:00` plus its period, anchored to today's
/// local date
pub fn parse_clock_time(hour_minute: &str, period: Period) -> Result<NaiveDateTime, ClockError> {
    parse_clock_time_on(Local::now().date_naive(), hour_minute, period)
}

/// Same as [`parse_clock_time`] with an explicit anchor date
pub fn parse_clock_time_on(
    date: NaiveDate,
    hour_minute: &str,
    period: Period,
) -> Result<NaiveDateTime, ClockError> {
    let (hour, minute) = parse_hour_minute(hour_minute)?;
    let time = NaiveTime::from_hms_opt(period.to_24_hour(hour), minute, 0)
        .ok_or_else(|| ClockError::InvalidFormat(hour_minute.to_string()))?;

    Ok(date.and_time(time))
}

/// Parse a combined display string such as `11:15 PM` or `6:30am`, anchored
/// to today's local date
pub fn parse_display_time(input: &str) -> Result<NaiveDateTime, ClockError> {
    parse_display_time_on(Local::now().date_naive(), input)
}

/// Same as [`parse_display_time`] with an explicit anchor date
pub fn parse_display_time_on(date: NaiveDate, input: &str) -> Result<NaiveDateTime, ClockError> {
    let trimmed = input.trim();
    if trimmed.len() < 2 || !trimmed.is_char_boundary(trimmed.len() - 2) {
        return Err(ClockError::InvalidFormat(input.to_string()));
    }

    let (clock, period) = trimmed.split_at(trimmed.len() - 2);
    let period: Period = period.parse()?;

    parse_clock_time_on(date, clock.trim_end(), period)
}

fn parse_hour_minute(input: &str) -> Result<(u32, u32), ClockError> {
    let (hour, minute) = input
        .trim()
        .split_once(':')
        .ok_or_else(|| ClockError::InvalidFormat(input.to_string()))?;

    if minute.len() != 2 {
        return Err(ClockError::InvalidFormat(input.to_string()));
    }

    let hour: u32 = hour
        .parse()
        .map_err(|_| ClockError::InvalidFormat(input.to_string()))?;
    let minute: u32 = minute
        .parse()
        .map_err(|_| ClockError::InvalidFormat(input.to_string()))?;

    if !(1..=12).contains(&hour) {
        return Err(ClockError::HourOutOfRange(hour));
    }
    if minute > 59 {
        return Err(ClockError::MinuteOutOfRange(minute));
    }

    Ok((hour, minute))
}

/// Render as `H:MM AM/PM` with no leading zero on the hour
pub fn format_clock_time<T: Timelike>(instant: &T) -> String {
    let (is_pm, hour) = instant.hour12();
    format!(
        "{}:{:02} {}",
        hour,
        instant.minute(),
        if is_pm { Period::Pm } else { Period::Am }
    )
}

/// Minutes from `start` to `end`. A negative span is taken to end on the
/// following day.
pub fn duration_minutes(start: &NaiveDateTime, end: &NaiveDateTime) -> i64 {
    let minutes = end.signed_duration_since(*start).num_minutes();
    if minutes < 0 {
        minutes + MINUTES_PER_DAY
    } else {
        minutes
    }
}

/// Render a duration as `7h` or `7h 30m`
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let remainder = minutes % 60;

    if remainder == 0 {
        format!("{}h", hours)
    } else {
        format!("{}h {}m", hours, remainder)
    }
}
