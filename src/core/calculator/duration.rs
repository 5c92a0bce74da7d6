//! Duration calculator: timestamp pair -> "Hh Mm" label and fractional hours.

use chrono::{DateTime, TimeZone};

const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

#[derive(Debug, Clone, PartialEq)]
pub struct DurationInfo {
    /// "{hours}h {minutes}m"
    pub formatted: String,
    /// `hours + minutes / 60`; seconds are truncated away.
    pub hours: f64,
    pub whole_hours: i64,
    pub minutes: i64,
}

/// Compute the worked duration between `start` and `end`.
///
/// A span where `end` precedes `start` (clock skew) is reported as zero.
pub fn calculate_duration<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> DurationInfo {
    let ms = end
        .clone()
        .signed_duration_since(start.clone())
        .num_milliseconds();
    from_millis(ms)
}

pub fn from_millis(ms: i64) -> DurationInfo {
    let ms = ms.max(0);
    let whole_hours = ms / MS_PER_HOUR;
    let minutes = (ms % MS_PER_HOUR) / MS_PER_MINUTE;

    DurationInfo {
        formatted: format!("{}h {}m", whole_hours, minutes),
        hours: whole_hours as f64 + minutes as f64 / 60.0,
        whole_hours,
        minutes,
    }
}

/// "M:SS" clock used by the break countdown and the break timer.
pub fn format_clock(ms: i64) -> String {
    let ms = ms.max(0);
    let minutes = ms / MS_PER_MINUTE;
    let seconds = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
    format!("{}:{:02}", minutes, seconds)
}
