use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::calculator::duration::DurationInfo;

/// en-US long date, e.g. "Monday, March 10, 2025".
pub const DATE_FORMAT: &str = "%A, %B %-d, %Y";

/// en-US 12-hour time with seconds, e.g. "09:00:00 AM".
pub const TIME_FORMAT: &str = "%I:%M:%S %p";

/// A completed work session, as stored under `timepunch-entries`.
///
/// Entries are never edited after creation: `hours_worked` always comes
/// from the duration calculator at clock-out time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub date: String,
    pub clock_in: String,
    pub clock_out: String,
    pub duration: String,
    pub hours_worked: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

impl Entry {
    pub fn new(
        id: String,
        clock_in: &DateTime<Local>,
        clock_out: &DateTime<Local>,
        duration: &DurationInfo,
        project: Option<String>,
    ) -> Self {
        Self {
            id,
            date: format_date(clock_in),
            clock_in: format_time(clock_in),
            clock_out: format_time(clock_out),
            duration: duration.formatted.clone(),
            hours_worked: duration.hours,
            project,
        }
    }

    /// Calendar day of the clock-in, if the stored label is readable.
    pub fn day(&self) -> Option<NaiveDate> {
        parse_date_label(&self.date)
    }

    pub fn project_label<'a>(&'a self, name_of: impl Fn(&str) -> Option<&'a str>) -> &'a str {
        match &self.project {
            Some(id) => name_of(id).unwrap_or(id.as_str()),
            None => NO_PROJECT,
        }
    }
}

pub const NO_PROJECT: &str = "No Project";

pub fn format_date(dt: &DateTime<Local>) -> String {
    dt.format(DATE_FORMAT).to_string()
}

pub fn format_time(dt: &DateTime<Local>) -> String {
    dt.format(TIME_FORMAT).to_string()
}

pub fn parse_date_label(label: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(label, "%A, %B %d, %Y").ok()
}
