//! Epoch-millisecond date helpers. All calendar math is done in UTC.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

pub const MINUTE_MILLIS: i64 = 60_000;
pub const DAY_MILLIS: i64 = 86_400_000;

pub fn to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}

/// Calendar month (1-12) and day of month (1-31).
pub fn month_day(millis: i64) -> Option<(u32, u32)> {
    to_datetime(millis).map(|dt| (dt.month(), dt.day()))
}

/// Midnight UTC of the given calendar day.
pub fn date_millis(year: i32, month: u32, day: u32) -> Option<i64> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).timestamp_millis())
}

/// Parses a timestamp given either as epoch milliseconds, a `YYYY-MM-DD`
/// date or an RFC 3339 date-time.
pub fn parse_timestamp(input: &str) -> Option<i64> {
    let input = input.trim();
    if let Ok(millis) = input.parse::<i64>() {
        return Some(millis);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.timestamp_millis());
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()?;
    date_millis(date.year(), date.month(), date.day())
}

pub fn format_date(millis: i64) -> String {
    match to_datetime(millis) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => millis.to_string(),
    }
}

pub fn format_datetime(millis: i64) -> String {
    match to_datetime(millis) {
        Some(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
        None => millis.to_string(),
    }
}
