//! Time utilities: creation-time identifiers and date stamps.

use chrono::{DateTime, Local, Utc};

/// Identifier derived from the creation instant (Unix milliseconds).
///
/// Ids are strictly increasing among `existing`: when the clock has not
/// moved past the largest existing id, the next integer is used instead.
pub fn time_derived_id<'a>(now: &DateTime<Local>, existing: impl IntoIterator<Item = &'a str>) -> String {
    let candidate = now.timestamp_millis();
    let max_existing = existing
        .into_iter()
        .filter_map(|id| id.parse::<i64>().ok())
        .max();

    match max_existing {
        Some(max) if max >= candidate => (max + 1).to_string(),
        _ => candidate.to_string(),
    }
}

/// `YYYY-MM-DD` of the UTC date, as used in export file names.
pub fn utc_date_stamp(now: &DateTime<Local>) -> String {
    now.with_timezone(&Utc).format("%Y-%m-%d").to_string()
}
