//! Blank detection and lenient parsing of stored values.
//!
//! Blank means empty or whitespace-only text, or (for amounts) a value that
//! parses to zero or does not parse at all.

use chrono::{DateTime, NaiveDate, Utc};

/// True for empty or whitespace-only text.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Parse decimal text into a finite number.
///
/// Accepts a leading `$` and thousands separators. Anything else that does
/// not parse (or is NaN/infinite) yields `None`.
pub fn parse_amount(value: &str) -> Option<f64> {
    let cleaned: String = value
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Amount in whole cents, rounded half away from zero.
///
/// Stays a float: parsed amounts can be far outside the `i64` cent range.
pub fn to_cents(amount: f64) -> f64 {
    (amount * 100.0).round()
}

/// An amount field is blank when it is unparseable or exactly zero.
pub fn is_blank_amount(value: &str) -> bool {
    parse_amount(value).map_or(true, |n| n == 0.0)
}

/// Parse a stored date: RFC 3339 timestamp or a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
