//! Time utilities: minute truncation, timestamp parsing/formatting, durations.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeDelta, TimeZone, Timelike, Utc};

/// Storage and export format: `2024-01-01T10:00:00Z`.
///
/// Fixed width and always UTC, so lexical order matches chronological order.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn truncate_to_minute(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts - TimeDelta::seconds(i64::from(ts.second()))
        - TimeDelta::nanoseconds(i64::from(ts.nanosecond()))
}

/// Convert to UTC and drop seconds.
pub fn normalize<Tz: TimeZone>(ts: &DateTime<Tz>) -> DateTime<Utc> {
    truncate_to_minute(ts.with_timezone(&Utc))
}

/// Accepts RFC 3339 (`2024-01-01T10:00:30Z`, `2024-01-01T12:00:00+02:00`)
/// or local wall-clock time as `YYYY-MM-DD HH:MM`.
///
/// A local time repeated by a backward DST shift resolves to its first
/// occurrence. A local time skipped by a forward shift is rejected.
pub fn parse_timestamp(s: &str) -> AppResult<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))?;

    naive
        .and_local_timezone(Local)
        .earliest()
        .map(|ts| ts.with_timezone(&Utc))
        .ok_or_else(|| AppError::InvalidTimestamp(s.to_string()))
}

pub fn parse_optional_timestamp(input: Option<&String>) -> AppResult<Option<DateTime<Utc>>> {
    input.map(|s| parse_timestamp(s)).transpose()
}

pub fn format_minutes(mins: i64) -> String {
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}
