use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Rendering of exercise dates in responses, e.g. `Sun Jan 01 2023`.
pub const DISPLAY_FORMAT: &str = "%a %b %d %Y";

/// Shown in place of a date the client sent but we could not read.
pub const INVALID_DATE: &str = "Invalid Date";

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    DISPLAY_FORMAT,
    "%b %d %Y",
    "%B %d, %Y",
    "%B %d %Y",
];

/// Parses a client supplied date. Everything is read as UTC and date-only
/// inputs resolve to midnight.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Some(naive) = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
    {
        return Some(naive.and_utc());
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn format_display(date: &DateTime<Utc>) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Display string for an optional instant, falling back to `Invalid Date`.
pub fn display_or_invalid(date: Option<&DateTime<Utc>>) -> String {
    date.map(format_display).unwrap_or_else(|| INVALID_DATE.to_string())
}
