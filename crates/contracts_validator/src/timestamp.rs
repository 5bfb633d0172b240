//! Permissive timestamp parsing.
//!
//! Timestamps are normalized to UTC and returned without offset so that
//! values with and without zone information compare on the same scale.
//! Values without zone information are taken to be UTC already.

use crate::DataValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Epoch values above this are read as milliseconds rather than seconds.
const EPOCH_MILLIS_THRESHOLD: i64 = 10_000_000_000;

/// Datetime layouts tried for strings without zone information.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

/// Datetime layouts tried for strings with a numeric offset.
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

/// Date-only layouts, read as midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y", "%m/%d/%Y"];

/// Parses a timestamp string in multiple formats.
///
/// Supports:
/// - ISO 8601 / RFC 3339 (e.g., "2024-01-15T10:30:00Z", "2024-01-15T10:30:00+02:00")
/// - RFC 2822 (e.g., "Mon, 15 Jan 2024 10:30:00 +0000")
/// - Common datetime formats without zone (e.g., "2024-01-15 10:30:00", "2024-01-15T10:30")
/// - Date only formats (e.g., "2024-01-15", "2024/01/15")
/// - Unix epoch seconds or milliseconds (e.g., "1705318200", "1705318200000")
///
/// Returns `None` for blank or unrecognized input.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.naive_utc());
    }

    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.naive_utc());
        }
    }

    // A trailing 'Z' on an otherwise naive layout means UTC
    let naive = raw.strip_suffix('Z').unwrap_or(raw);
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(dt);
        }
    }

    if raw.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
        if let Ok(epoch) = raw.parse::<i64>() {
            if let Some(ts) = from_epoch(epoch) {
                return Some(ts);
            }
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Interprets a typed value as a timestamp.
///
/// Strings go through [`parse_timestamp`], numbers are unix epoch seconds
/// (or milliseconds when large), and already-coerced timestamps pass
/// through. Booleans and nulls never yield a timestamp.
pub fn timestamp_from_value(value: &DataValue) -> Option<NaiveDateTime> {
    match value {
        DataValue::Timestamp(ts) => Some(*ts),
        DataValue::String(s) => parse_timestamp(s),
        DataValue::Int(epoch) => from_epoch(*epoch),
        DataValue::Float(epoch) => from_epoch_float(*epoch),
        DataValue::Bool(_) | DataValue::Null => None,
    }
}

fn from_epoch(epoch: i64) -> Option<NaiveDateTime> {
    let dt = if epoch.unsigned_abs() > EPOCH_MILLIS_THRESHOLD as u64 {
        DateTime::from_timestamp_millis(epoch)?
    } else {
        DateTime::from_timestamp(epoch, 0)?
    };
    Some(dt.naive_utc())
}

fn from_epoch_float(epoch: f64) -> Option<NaiveDateTime> {
    if !epoch.is_finite() {
        return None;
    }
    if epoch.fract() == 0.0 && epoch.abs() < i64::MAX as f64 {
        return from_epoch(epoch as i64);
    }
    let millis = (epoch * 1000.0).round();
    if millis.abs() >= i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64).map(|dt| dt.naive_utc())
}
