use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%Y %b %d",
    "%Y %B %d",
    "%d %b %Y",
    "%b %d %Y",
];

/// Best-effort timestamp parsing for messy `publish_time` cells.
///
/// Accepts RFC 3339, ISO-like date-times, several day-precision layouts,
/// `YYYY Mon`, `YYYY-MM` and a bare four-digit year (anchored to January 1st).
/// A UTC offset is dropped, not applied. Returns `None` for anything else,
/// including dates outside the nanosecond timestamp range.
pub fn parse_publish_time(raw: &str) -> Option<NaiveDateTime> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    parse_any(value).filter(in_timestamp_range)
}

fn parse_any(value: &str) -> Option<NaiveDateTime> {
    // Keep the wall-clock time as written; the year must not shift with the offset.
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    parse_date(value).map(|d| d.and_time(NaiveTime::MIN))
}

/// Nanosecond timestamps cover 1677-09-21 through 2262-04-11; dates outside
/// that span are treated as unparsable.
fn in_timestamp_range(dt: &NaiveDateTime) -> bool {
    let date = dt.date();
    match (
        NaiveDate::from_ymd_opt(1677, 9, 21),
        NaiveDate::from_ymd_opt(2262, 4, 11),
    ) {
        (Some(first), Some(last)) => first <= date && date <= last,
        _ => false,
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some(date);
        }
    }
    parse_year_month(value).or_else(|| parse_bare_year(value))
}

/// `YYYY-MM`, `YYYY/MM` or `YYYY Mon`, anchored to the first of the month.
fn parse_year_month(value: &str) -> Option<NaiveDate> {
    let padded = format!("{value} 01");
    for fmt in ["%Y-%m %d", "%Y/%m %d", "%Y %b %d", "%Y %B %d"] {
        if let Ok(date) = NaiveDate::parse_from_str(&padded, fmt) {
            return Some(date);
        }
    }
    None
}

fn parse_bare_year(value: &str) -> Option<NaiveDate> {
    if value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = value.parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, 1, 1)
}
