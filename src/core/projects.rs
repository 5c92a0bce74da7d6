//! Project aggregation: creation, lookup and per-project hour totals.

use std::collections::HashMap;

use chrono::{DateTime, Local};

use crate::models::entry::Entry;
use crate::models::project::Project;
use crate::utils::time::time_derived_id;

/// Totals closer than this are the same number of hours.
const TOTAL_TOLERANCE: f64 = 1e-9;

pub struct ProjectLogic;

impl ProjectLogic {
    /// Build a new project for `name`, or `None` for a blank name.
    pub fn build(name: &str, existing: &[Project], now: &DateTime<Local>) -> Option<Project> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let id = time_derived_id(now, existing.iter().map(|p| p.id.as_str()));
        Some(Project::new(id, name, existing.len()))
    }

    /// Resolve a user reference: exact id first, then case-insensitive name.
    pub fn resolve<'a>(projects: &'a [Project], reference: &str) -> Option<&'a Project> {
        let reference = reference.trim();
        projects
            .iter()
            .find(|p| p.id == reference)
            .or_else(|| {
                projects
                    .iter()
                    .find(|p| p.name.eq_ignore_ascii_case(reference))
            })
    }

    pub fn name_of<'a>(projects: &'a [Project], id: &str) -> Option<&'a str> {
        projects
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
    }

    /// Incremental update on clock-out. Returns false when the entry has
    /// no project or the project no longer exists.
    pub fn apply_entry(projects: &mut [Project], entry: &Entry) -> bool {
        let Some(id) = &entry.project else {
            return false;
        };
        match projects.iter_mut().find(|p| &p.id == id) {
            Some(p) => {
                p.total_hours += entry.hours_worked;
                true
            }
            None => false,
        }
    }

    /// Hours per project id, summed from the entry list.
    ///
    /// Entries are stored newest first; summing oldest first repeats the
    /// additions `apply_entry` made at each clock-out, bit for bit.
    pub fn totals(entries: &[Entry]) -> HashMap<String, f64> {
        let mut out: HashMap<String, f64> = HashMap::new();
        for entry in entries.iter().rev() {
            if let Some(id) = &entry.project {
                *out.entry(id.clone()).or_default() += entry.hours_worked;
            }
        }
        out
    }

    /// Replace every stored total with the sum derived from `entries`.
    /// Returns how many projects changed.
    pub fn recompute(projects: &mut [Project], entries: &[Entry]) -> usize {
        let totals = Self::totals(entries);
        let mut changed = 0;
        for p in projects.iter_mut() {
            let derived = totals.get(&p.id).copied().unwrap_or(0.0);
            if (p.total_hours - derived).abs() > TOTAL_TOLERANCE {
                p.total_hours = derived;
                changed += 1;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::PALETTE;
    use chrono::TimeZone;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
    }

    fn entry(project: Option<&str>, hours: f64) -> Entry {
        Entry {
            id: "1".into(),
            date: "Monday, March 10, 2025".into(),
            clock_in: "09:00:00 AM".into(),
            clock_out: "10:00:00 AM".into(),
            duration: "1h 0m".into(),
            hours_worked: hours,
            project: project.map(String::from),
        }
    }

    #[test]
    fn first_project_takes_first_color() {
        let p = ProjectLogic::build("Alpha", &[], &now()).unwrap();
        assert_eq!(p.name, "Alpha");
        assert_eq!(p.color, PALETTE[0]);
        assert_eq!(p.total_hours, 0.0);
    }

    #[test]
    fn palette_rotates_with_project_count() {
        let mut projects = Vec::new();
        for i in 0..7 {
            let p = ProjectLogic::build(&format!("P{i}"), &projects, &now()).unwrap();
            projects.push(p);
        }
        assert_eq!(projects[5].color, PALETTE[5]);
        assert_eq!(projects[6].color, PALETTE[0]);
        let mut ids: Vec<_> = projects.iter().map(|p| p.id.clone()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 7);
    }

    #[test]
    fn blank_names_are_rejected_and_names_trimmed() {
        assert!(ProjectLogic::build("   ", &[], &now()).is_none());
        assert!(ProjectLogic::build("", &[], &now()).is_none());
        assert_eq!(
            ProjectLogic::build("  Beta ", &[], &now()).unwrap().name,
            "Beta"
        );
    }

    #[test]
    fn resolve_by_id_or_name() {
        let a = ProjectLogic::build("Alpha", &[], &now()).unwrap();
        let projects = vec![a.clone()];
        assert_eq!(ProjectLogic::resolve(&projects, &a.id), Some(&a));
        assert_eq!(ProjectLogic::resolve(&projects, "alpha"), Some(&a));
        assert!(ProjectLogic::resolve(&projects, "gamma").is_none());
    }

    #[test]
    fn incremental_and_derived_totals_agree() {
        let mut projects = vec![
            Project::new("a".into(), "A", 0),
            Project::new("b".into(), "B", 1),
        ];
        let entries = vec![entry(Some("a"), 1.5), entry(None, 2.0), entry(Some("a"), 0.25)];
        for e in &entries {
            ProjectLogic::apply_entry(&mut projects, e);
        }
        assert_eq!(projects[0].total_hours, 1.75);
        assert_eq!(projects[1].total_hours, 0.0);

        projects[1].total_hours = 9.0;
        assert_eq!(ProjectLogic::recompute(&mut projects, &entries), 1);
        assert_eq!(projects[1].total_hours, 0.0);
        assert_eq!(ProjectLogic::totals(&entries).get("a"), Some(&1.75));
    }

    #[test]
    fn uneven_minutes_do_not_look_like_drift() {
        let mut projects = vec![Project::new("a".into(), "A", 0)];
        let mut entries: Vec<Entry> = Vec::new();
        for minutes in [7, 13, 29, 41, 53, 67, 71, 83, 89, 97, 101, 11, 19, 23, 31, 37] {
            let e = entry(Some("a"), minutes as f64 / 60.0);
            ProjectLogic::apply_entry(&mut projects, &e);
            entries.insert(0, e);

            let mut copy = projects.clone();
            assert_eq!(ProjectLogic::recompute(&mut copy, &entries), 0);
            assert_eq!(copy[0].total_hours, projects[0].total_hours);
        }
    }
}
