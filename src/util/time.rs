//! Time and date utilities.
//!
//! Upstream providers report wall-clock times in slightly different shapes
//! (`"06:05"`, `"06:05 (+03)"`, `"06:05 (EET)"`); everything stored in the cache is a bare
//! zero-padded `HH:MM`. This module also enumerates the days of a month for the month view
//! and the operator refresh.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};

use crate::error::Error;

const TIME_FORMAT: &str = "%H:%M";

/// Parses a provider time-of-day string, discarding any timezone suffix.
///
/// # Arguments
/// - `raw` - Time string such as `"06:05"` or `"06:05 (+03)"`
///
/// # Returns
/// - `Ok(NaiveTime)` - Parsed time of day
/// - `Err(Error::ParseError)` - No leading `H:MM`/`HH:MM` token
pub fn parse_time_of_day(raw: &str) -> Result<NaiveTime, Error> {
    let token = raw
        .split_whitespace()
        .next()
        .ok_or_else(|| Error::ParseError(format!("empty time of day {:?}", raw)))?;

    NaiveTime::parse_from_str(token, TIME_FORMAT)
        .map_err(|e| Error::ParseError(format!("invalid time of day {:?}: {}", raw, e)))
}

/// Formats a time of day as zero-padded `HH:MM`.
pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Normalizes a provider time-of-day string to bare `HH:MM`.
pub fn normalize_time_of_day(raw: &str) -> Result<String, Error> {
    parse_time_of_day(raw).map(format_time_of_day)
}

/// Shifts a time of day by `minutes`, wrapping around midnight.
pub fn shift_time_of_day(time: NaiveTime, minutes: i64) -> NaiveTime {
    let (shifted, _) = time.overflowing_add_signed(Duration::minutes(minutes));
    shifted
}

/// Returns every date of the given month in order.
///
/// # Returns
/// - `Ok(Vec<NaiveDate>)` - 28 to 31 dates starting at the 1st
/// - `Err(Error::ParseError)` - `month` is outside 1..=12 or the year is out of range
pub fn days_of_month(year: i32, month: u32) -> Result<Vec<NaiveDate>, Error> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::ParseError(format!("invalid month {}-{:02}", year, month)))?;

    Ok(first
        .iter_days()
        .take_while(|day| day.month() == first.month())
        .collect())
}
