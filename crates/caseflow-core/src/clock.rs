//! Day arithmetic between the reference instant and ISO timestamps.
//!
//! Case data arrives as strings. This module is the validation boundary:
//! anything missing or unparseable comes back as `None`, which every rule
//! treats as "not yet due".

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use tracing::debug;

use crate::traits::Clock;

/// Reads the host's wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Parse an RFC 3339 timestamp, a zone-less `YYYY-MM-DDTHH:MM:SS[.fff]`
/// (read as UTC) or a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Whole days elapsed from `raw` to `now`, truncated toward zero.
///
/// Returns `None` when `raw` is absent or cannot be parsed. Future dates
/// yield zero or a negative count.
pub fn days_since(now: DateTime<Utc>, raw: Option<&str>) -> Option<i64> {
    let raw = raw?;
    match parse_instant(raw) {
        Some(then) => Some((now - then).num_days()),
        None => {
            debug!(value = %raw, "ignoring unparseable date");
            None
        }
    }
}

pub fn add_days(instant: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    instant + Duration::days(days)
}

/// The canonical wire form for timestamps the engine writes.
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
