use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use chrono_tz::Tz;

use crate::error::LayoutError;

const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];
const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parses a wall-clock `"HH:MM"` (seconds tolerated) time of day.
pub fn parse_time_of_day(raw: &str) -> Result<NaiveTime, LayoutError> {
    let trimmed = raw.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| LayoutError::InvalidTime(raw.to_string()))
}

/// Reduces a scheduled date string to a civil date in `tz`.
///
/// A bare `YYYY-MM-DD` is taken as written. Timestamps carrying an offset are
/// converted into `tz` first, so a late-evening booking serialized in UTC does
/// not slide onto the neighbouring day. UTC midnight is how the backend
/// serializes a date without a time, so it keeps its UTC date in every zone.
pub fn parse_civil_date(raw: &str, tz: Tz) -> Result<NaiveDate, LayoutError> {
    let trimmed = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        let utc_midnight = timestamp.offset().local_minus_utc() == 0
            && timestamp.num_seconds_from_midnight() == 0
            && timestamp.nanosecond() == 0;
        if utc_midnight {
            return Ok(timestamp.date_naive());
        }
        return Ok(timestamp.with_timezone(&tz).date_naive());
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|timestamp| timestamp.date())
        .ok_or_else(|| LayoutError::InvalidDate(raw.to_string()))
}

pub fn parse_timezone(name: &str) -> Result<Tz, LayoutError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| LayoutError::UnknownTimezone(name.to_string()))
}
