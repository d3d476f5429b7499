//! Fixed-format display strings for money and dates.
//!
//! Nothing here consults the locale: identical values always format to
//! identical strings.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::error::{RenderError, Result};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Timestamp layouts accepted besides RFC 3339 and plain dates.
const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// `$` followed by the value with exactly two decimals and no digit
/// grouping: `1234.5` becomes `"$1234.50"`.
pub fn format_money(value: f64) -> String {
    // Avoid "$-0.00" for negative zero.
    let value = if value == 0.0 { 0.0 } else { value };
    format!("${:.2}", value)
}

/// `"January 5, 2024"`: full English month name, day and year without
/// padding.
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{} {}, {}",
        MONTH_NAMES[date.month0() as usize],
        date.day(),
        date.year()
    )
}

/// Parse a date-only string or a full timestamp into its calendar date.
///
/// Time of day is dropped and offsets are never applied: the date is
/// read from the value's own fields, so `2024-01-05T23:30:00-05:00` is
/// January 5.
pub fn parse_date_like(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local().date());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
        .ok_or_else(|| RenderError::InvalidDate(s.to_string()))
}

/// [`parse_date_like`] followed by [`format_date`].
pub fn format_date_like(s: &str) -> Result<String> {
    parse_date_like(s).map(format_date)
}
