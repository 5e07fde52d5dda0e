//! Calendar helpers: free-form date parsing and the month arithmetic behind the default report
//! window.
use chrono::{
    DateTime,
    Datelike,
    Months,
    NaiveDate,
    NaiveDateTime,
};

use tracing::debug;

use crate::err_impl;

err_impl! {
    /// Errors raised while interpreting user-supplied dates.
    TimeError,
    /// The input did not match any supported date layout.
    #[error("could not parse date: {0}")]
    UnparseableDate(String),

    /// Month arithmetic left the representable calendar range.
    #[error("date out of range: {0}")]
    OutOfRange(String),
}

// Layouts tried in order; the first successful parse wins.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%b %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Parse a loosely-formatted date string ("2023-01-01", "Jan 5, 2023", an RFC 3339 timestamp,
/// ...) into a calendar date.  Any time-of-day component is discarded.
pub fn parse_date(input: &str) -> anyhow::Result<NaiveDate> {
    let trimmed = input.trim();

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
    {
        return Ok(date);
    }

    debug!("{trimmed:?} is not a plain date, trying datetime layouts");
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
    {
        return Ok(dt.date());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }

    Err(TimeError::unparseable_date(input))
}

/// The first day of the month containing `day`.
pub fn first_day_of_month(day: NaiveDate) -> anyhow::Result<NaiveDate> {
    day.with_day(1).ok_or_else(|| TimeError::out_of_range(&day.to_string()))
}

/// The first day of the month before the one containing `day`.
pub fn first_day_of_previous_month(day: NaiveDate) -> anyhow::Result<NaiveDate> {
    first_day_of_month(day)?
        .checked_sub_months(Months::new(1))
        .ok_or_else(|| TimeError::out_of_range(&day.to_string()))
}

/// The last day of the month containing `day`.
pub fn last_day_of_month(day: NaiveDate) -> anyhow::Result<NaiveDate> {
    first_day_of_month(day)?
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| TimeError::out_of_range(&day.to_string()))
}
