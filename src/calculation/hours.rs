//! Worked-hours calculation from 12-hour clock strings.
//!
//! Check events are stored as 12-hour clock strings such as `"09:00 AM"` or
//! `"05:30PM"`. This module parses them and derives the hours between a
//! check-in and a check-out.

use chrono::{NaiveTime, Timelike};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// Number of decimal places kept on computed hours.
pub const HOURS_DECIMAL_PLACES: u32 = 2;

const MINUTES_PER_HOUR: i64 = 60;

fn invalid(value: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidTime {
        value: value.to_string(),
        message: message.into(),
    }
}

/// Parses a 12-hour clock string into minutes since midnight.
///
/// Accepts `HH:MM AM`, `HH:MM PM`, with or without the space, and in either
/// letter case. 12 AM is midnight (0) and 12 PM is noon (720).
///
/// # Errors
///
/// Returns [`EngineError::InvalidTime`] if the marker is missing, the hour is
/// outside 1-12, the minute is outside 0-59, or either part is not a number.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::parse_clock_minutes;
///
/// assert_eq!(parse_clock_minutes("12:00 AM").unwrap(), 0);
/// assert_eq!(parse_clock_minutes("01:15PM").unwrap(), 13 * 60 + 15);
/// assert!(parse_clock_minutes("13:00").is_err());
/// ```
pub fn parse_clock_minutes(value: &str) -> EngineResult<u32> {
    let normalized = value.trim().to_ascii_uppercase();

    let (clock, is_pm) = if let Some(clock) = normalized.strip_suffix("PM") {
        (clock, true)
    } else if let Some(clock) = normalized.strip_suffix("AM") {
        (clock, false)
    } else {
        return Err(invalid(value, "missing AM/PM marker"));
    };

    let (hour, minute) = clock
        .trim_end()
        .split_once(':')
        .ok_or_else(|| invalid(value, "expected HH:MM"))?;

    let hour: u32 = hour
        .parse()
        .map_err(|_| invalid(value, "hour is not a number"))?;
    let minute: u32 = minute
        .parse()
        .map_err(|_| invalid(value, "minute is not a number"))?;

    if !(1..=12).contains(&hour) {
        return Err(invalid(value, "hour must be between 1 and 12"));
    }
    if minute > 59 {
        return Err(invalid(value, "minute must be between 0 and 59"));
    }

    let hour_24 = match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };

    Ok(hour_24 * 60 + minute)
}

/// Computes the hours between a check-in and a check-out.
///
/// The result is `(check_out - check_in) / 60`, rounded to two decimal
/// places. A check-out earlier than the check-in yields a negative value;
/// callers decide how to treat it (the store clamps it to zero). Shifts
/// crossing midnight are not recognised.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTime`] if either string is malformed.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::compute_hours;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let hours = compute_hours("09:00 AM", "05:30 PM").unwrap();
/// assert_eq!(hours, Decimal::from_str("8.50").unwrap());
/// ```
pub fn compute_hours(check_in: &str, check_out: &str) -> EngineResult<Decimal> {
    let in_minutes = i64::from(parse_clock_minutes(check_in)?);
    let out_minutes = i64::from(parse_clock_minutes(check_out)?);

    let hours = Decimal::from(out_minutes - in_minutes) / Decimal::from(MINUTES_PER_HOUR);
    let mut hours = hours
        .round_dp_with_strategy(HOURS_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    hours.rescale(HOURS_DECIMAL_PLACES);
    Ok(hours)
}

/// Formats a time of day as a 12-hour clock string (e.g. `"09:05 AM"`).
pub fn format_clock_time(time: NaiveTime) -> String {
    let time = time.with_second(0).unwrap_or(time);
    time.format("%I:%M %p").to_string()
}
