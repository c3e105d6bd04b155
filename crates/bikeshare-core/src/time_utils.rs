use chrono::{Datelike, NaiveDateTime, Timelike};
use tracing::trace;

// ── Timestamp parsing ─────────────────────────────────────────────────────────

/// Formats accepted for trip timestamps, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse a trip timestamp as a naive local date-time.
///
/// The datasets carry no timezone; values are taken at face value.
/// Returns `None` for empty strings or unrecognised formats.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let parsed = TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok());
    if parsed.is_none() {
        trace!("could not parse timestamp \"{}\"", s);
    }
    parsed
}

// ── CalendarFields ────────────────────────────────────────────────────────────

/// Calendar values derived once from a trip's start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarFields {
    /// 1 (January) ..= 12 (December).
    pub month: u32,
    /// 0 (Monday) ..= 6 (Sunday).
    pub weekday: u32,
    /// 0 ..= 23.
    pub hour: u32,
}

impl CalendarFields {
    pub fn from_timestamp(ts: &NaiveDateTime) -> Self {
        Self {
            month: ts.month(),
            weekday: ts.weekday().num_days_from_monday(),
            hour: ts.hour(),
        }
    }
}
