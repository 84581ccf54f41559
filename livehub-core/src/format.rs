//! Display formatting for event dates

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::model::PLACEHOLDER;

/// Output format for a single day
const DAY_FORMAT: &str = "%d %b %Y";

/// Parse an ISO-8601 date or date-time into its calendar day
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// `start – end`, a single day when only one side is known, else `—`
///
/// Values that fail to parse are treated as absent.
pub fn format_date_range(start: Option<&str>, end: Option<&str>) -> String {
    let start = start.and_then(parse_day);
    let end = end.and_then(parse_day);

    match (start, end) {
        (Some(s), Some(e)) => format!("{} – {}", s.format(DAY_FORMAT), e.format(DAY_FORMAT)),
        (Some(d), None) | (None, Some(d)) => d.format(DAY_FORMAT).to_string(),
        (None, None) => PLACEHOLDER.to_string(),
    }
}
