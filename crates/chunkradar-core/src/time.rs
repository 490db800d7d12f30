//! Calendar helpers. Dates are stored as `YYYY-MM-DD` strings in UTC.

use chrono::{Days, NaiveDate, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Current calendar date (UTC).
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// RFC 3339 timestamp for `createdAt`/`updatedAt` fields.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a stored date string. Returns `None` for malformed input.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

pub fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(date)
}

pub fn sub_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(date)
}
