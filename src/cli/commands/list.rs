use crate::cli::commands::{open_tracker, theme_of};
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::entry::{Entry, NO_PROJECT};
use crate::models::project::Project;
use crate::ui::messages::{header, info};
use crate::utils::colors::{colorize_optional, paint_project};
use crate::utils::table::Table;

pub(crate) fn entries_table(entries: &[Entry], projects: &[Project]) -> Table {
    let mut table =
        Table::with_headers(&["Date", "Clock In", "Clock Out", "Duration", "Hours", "Project"]);

    for e in entries {
        let project = match &e.project {
            Some(id) => match projects.iter().find(|p| &p.id == id) {
                Some(p) => paint_project(&p.name, Some(p.color.as_str())),
                None => paint_project(id, None),
            },
            None => paint_project(NO_PROJECT, None),
        };
        table.add_row(vec![
            e.date.clone(),
            e.clock_in.clone(),
            e.clock_out.clone(),
            colorize_optional(&e.duration),
            format!("{:.2}", e.hours_worked),
            project,
        ]);
    }
    table
}

pub fn handle(cfg: &Config, limit: Option<usize>) -> AppResult<()> {
    let tracker = open_tracker(cfg)?;
    let theme = theme_of(&tracker);

    header("Work log", theme.accent());
    if tracker.entries().is_empty() {
        info("No entries recorded yet.");
        return Ok(());
    }

    let shown = limit
        .unwrap_or(tracker.entries().len())
        .min(tracker.entries().len());
    let table = entries_table(&tracker.entries()[..shown], tracker.projects());
    print!("{}", table.render());

    if shown < tracker.entries().len() {
        println!("… {} older entries", tracker.entries().len() - shown);
    }
    Ok(())
}
