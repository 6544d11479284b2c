//! Parsing for the timeline API's `created_at` field.
//!
//! The API emits timestamps like `Thu Nov 14 03:37:31 +0000 2013`. Parsed
//! values keep their offset so serialization round-trips what the source sent.

use chrono::{DateTime, FixedOffset};

use crate::CoreError;

/// `chrono` format string for `<weekday> <month> <day> <HH:mm:ss> <offset> <year>`.
pub const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Sentinel used when an item carries no timestamp: the Unix epoch at `+00:00`.
#[must_use]
pub fn zero_timestamp() -> DateTime<FixedOffset> {
    DateTime::<FixedOffset>::default()
}

/// Parses a `created_at` value, preserving its UTC offset.
///
/// Empty or whitespace-only input maps to [`zero_timestamp`] instead of failing.
///
/// # Errors
///
/// Returns [`CoreError::InvalidTimestamp`] if a non-empty value does not match
/// [`CREATED_AT_FORMAT`].
pub fn parse_created_at(value: &str) -> Result<DateTime<FixedOffset>, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(zero_timestamp());
    }

    DateTime::parse_from_str(trimmed, CREATED_AT_FORMAT).map_err(|source| {
        CoreError::InvalidTimestamp {
            value: value.to_string(),
            source,
        }
    })
}
