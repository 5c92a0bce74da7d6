// src/export/model.rs

use crate::core::projects::ProjectLogic;
use crate::models::entry::Entry;
use crate::models::project::Project;

/// One exported entry, project already resolved to a display label.
#[derive(Clone, Debug, PartialEq)]
pub struct EntryExport {
    pub date: String,
    pub clock_in: String,
    pub clock_out: String,
    pub duration: String,
    pub hours_worked: f64,
    pub project: String,
}

impl EntryExport {
    pub fn from_entry(entry: &Entry, projects: &[Project]) -> Self {
        Self {
            date: entry.date.clone(),
            clock_in: entry.clock_in.clone(),
            clock_out: entry.clock_out.clone(),
            duration: entry.duration.clone(),
            hours_worked: entry.hours_worked,
            project: entry
                .project_label(|id| ProjectLogic::name_of(projects, id))
                .to_string(),
        }
    }

    /// Hours with exactly two decimals.
    pub fn hours_label(&self) -> String {
        format!("{:.2}", self.hours_worked)
    }
}

/// Header shared by CSV and any tabular output.
pub(crate) const HEADERS: [&str; 6] = [
    "Date",
    "Clock In",
    "Clock Out",
    "Duration",
    "Hours Worked",
    "Project",
];

pub(crate) fn entry_to_row(e: &EntryExport) -> [String; 6] {
    [
        e.date.clone(),
        e.clock_in.clone(),
        e.clock_out.clone(),
        e.duration.clone(),
        e.hours_label(),
        e.project.clone(),
    ]
}

/// Entries in stored order (newest first).
pub fn build_rows(entries: &[Entry], projects: &[Project]) -> Vec<EntryExport> {
    entries
        .iter()
        .map(|e| EntryExport::from_entry(e, projects))
        .collect()
}
