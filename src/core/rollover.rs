//! Day rollover policy
//!
//! A new round starts whenever the UTC calendar date changes. An unfinished
//! round from a previous day is discarded, not resumed.

use chrono::{DateTime, Days, SecondsFormat, TimeDelta, Utc};

/// Decide whether a new round must start
///
/// True when there is no last-played marker, or when `last_played` and
/// `now` fall on different UTC calendar dates.
#[must_use]
pub fn should_start_new_round(last_played: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    last_played.is_none_or(|last| last.date_naive() != now.date_naive())
}

/// Time remaining until the next UTC midnight
#[must_use]
pub fn time_until_next_round(now: DateTime<Utc>) -> TimeDelta {
    now.date_naive()
        .checked_add_days(Days::new(1))
        .and_then(|tomorrow| tomorrow.and_hms_opt(0, 0, 0))
        .map_or(TimeDelta::zero(), |midnight| midnight.and_utc() - now)
}

/// Serialize a last-played marker as an ISO-8601 timestamp
#[must_use]
pub fn format_marker(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored last-played marker
///
/// Malformed text is treated as absent.
#[must_use]
pub fn parse_marker(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text.trim())
        .ok()
        .map(|at| at.with_timezone(&Utc))
}
