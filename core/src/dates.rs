//! Timestamp normalization.
//!
//! Payments store their transaction date as integer seconds since the
//! Unix epoch (UTC). Every timestamp is decoded to a calendar date-time
//! at load time; all month/year filters and min/max comparisons operate
//! on the decoded value.

use chrono::{DateTime, NaiveDateTime};

/// The single date-time rendering used everywhere in the outputs.
/// Naive — no timezone offset is emitted.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Decode epoch seconds to a naive UTC date-time.
/// Returns None for out-of-range values.
pub fn from_epoch_seconds(secs: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(secs, 0).map(|dt| dt.naive_utc())
}

pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}
