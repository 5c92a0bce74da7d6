//! Dashboard figures derived from the entry list.
//!
//! Nothing here is stored: every number is recomputed from entries on
//! demand, so the results can never drift from the log.

use chrono::{Duration, NaiveDate};

use crate::core::projects::ProjectLogic;
use crate::models::entry::{Entry, NO_PROJECT};
use crate::models::project::Project;

/// Entries per "week" when averaging: five working sessions.
const SESSIONS_PER_WEEK: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    pub day: NaiveDate,
    /// e.g. "Mon 3/10"
    pub label: String,
    /// Rounded to one decimal.
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectShare {
    pub label: String,
    pub color: Option<String>,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_entries: usize,
    pub total_hours: f64,
    pub today_hours: f64,
    pub last_7_days: Vec<DayBucket>,
    pub this_week: f64,
    pub weekly_average: f64,
    pub by_project: Vec<ProjectShare>,
}

pub struct Analytics;

impl Analytics {
    pub fn summarize(entries: &[Entry], projects: &[Project], today: NaiveDate) -> Summary {
        let last_7_days = Self::daily_hours_last_7_days(entries, today);
        Summary {
            total_entries: entries.len(),
            total_hours: Self::total_hours(entries),
            today_hours: Self::hours_on(entries, today),
            this_week: Self::this_week(&last_7_days),
            last_7_days,
            weekly_average: Self::weekly_average(entries),
            by_project: Self::by_project(entries, projects),
        }
    }

    pub fn total_hours(entries: &[Entry]) -> f64 {
        entries.iter().map(|e| e.hours_worked).sum()
    }

    /// Hours of entries whose date label falls on `day`. Entries with an
    /// unreadable date are skipped.
    pub fn hours_on(entries: &[Entry], day: NaiveDate) -> f64 {
        entries
            .iter()
            .filter(|e| e.day() == Some(day))
            .map(|e| e.hours_worked)
            .sum()
    }

    /// Seven buckets, oldest first, ending with `today`.
    pub fn daily_hours_last_7_days(entries: &[Entry], today: NaiveDate) -> Vec<DayBucket> {
        (0..7)
            .rev()
            .map(|back| {
                let day = today - Duration::days(back);
                DayBucket {
                    day,
                    label: day.format("%a %-m/%-d").to_string(),
                    hours: round1(Self::hours_on(entries, day)),
                }
            })
            .collect()
    }

    pub fn this_week(buckets: &[DayBucket]) -> f64 {
        round1(buckets.iter().map(|b| b.hours).sum())
    }

    /// Total hours over `max(entries / 5, 1)` weeks.
    pub fn weekly_average(entries: &[Entry]) -> f64 {
        if entries.is_empty() {
            return 0.0;
        }
        let weeks = (entries.len() as f64 / SESSIONS_PER_WEEK).max(1.0);
        round1(Self::total_hours(entries) / weeks)
    }

    /// Derived per-project hours, largest first. Unattributed time is
    /// reported under "No Project" when there is any.
    pub fn by_project(entries: &[Entry], projects: &[Project]) -> Vec<ProjectShare> {
        let totals = ProjectLogic::totals(entries);

        let mut shares: Vec<ProjectShare> = totals
            .iter()
            .map(|(id, hours)| {
                let project = projects.iter().find(|p| &p.id == id);
                ProjectShare {
                    label: project.map_or_else(|| id.clone(), |p| p.name.clone()),
                    color: project.map(|p| p.color.clone()),
                    hours: *hours,
                }
            })
            .collect();

        let unattributed: f64 = entries
            .iter()
            .filter(|e| e.project.is_none())
            .map(|e| e.hours_worked)
            .sum();
        if unattributed > 0.0 {
            shares.push(ProjectShare {
                label: NO_PROJECT.to_string(),
                color: None,
                hours: unattributed,
            });
        }

        shares.sort_by(|a, b| b.hours.total_cmp(&a.hours).then_with(|| a.label.cmp(&b.label)));
        shares
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
