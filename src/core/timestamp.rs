//! Timestamp helpers
//!
//! Log lines carry a local wall-clock time of day with millisecond precision;
//! log file names carry the Unix time in nanoseconds at logger construction.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Write;

/// strftime pattern for the line prefix: `15:04:05.000`
pub const LINE_TIME_FORMAT: &str = "%H:%M:%S%.3f";

/// Append the time of day of `datetime` as `HH:MM:SS.mmm`
pub fn write_clock<Tz>(out: &mut String, datetime: &DateTime<Tz>)
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    // Writing to a String cannot fail.
    let _ = write!(out, "{}", datetime.format(LINE_TIME_FORMAT));
}

/// Append the current local time of day
pub fn write_now(out: &mut String) {
    write_clock(out, &Local::now());
}

/// Nanoseconds since the Unix epoch, used to name log files
pub fn unix_nanos() -> i64 {
    let now = Utc::now();
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros().saturating_mul(1_000))
}
