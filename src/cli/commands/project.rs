use crate::cli::commands::{open_tracker, theme_of};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::projects::ProjectLogic;
use crate::core::session::TrackerEvent;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info, success, warning};
use crate::utils::colors::paint_project;
use crate::utils::formatting::hours1;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Project {
        add,
        select,
        clear,
        list,
    } = cmd
    else {
        return Ok(());
    };

    let mut tracker = open_tracker(cfg)?;

    if let Some(name) = add {
        match tracker.add_project(name)? {
            Some(TrackerEvent::ProjectAdded { project }) => success(format!(
                "Project '{}' created (id {}, {})",
                project.name, project.id, project.color
            )),
            _ => warning("Project name cannot be empty"),
        }
    }

    if let Some(reference) = select {
        let id = ProjectLogic::resolve(tracker.projects(), reference)
            .map(|p| p.id.clone())
            .ok_or_else(|| AppError::InvalidProject(reference.clone()))?;
        tracker.select_project(Some(id.as_str()))?;
        if let Some(p) = tracker.current_project() {
            success(format!("Active project: {}", p.name));
        }
    }

    if *clear {
        tracker.select_project(None)?;
        success("Active project cleared: next sessions are not attributed");
    }

    if *list {
        let theme = theme_of(&tracker);
        header("Projects", theme.accent());
        if tracker.projects().is_empty() {
            info("No projects yet. Create one with `project --add NAME`.");
            return Ok(());
        }

        let active = tracker.state().current_project.clone();
        let mut table = Table::with_headers(&["", "Id", "Project", "Total"]);
        for p in tracker.projects() {
            let marker = if active.as_deref() == Some(p.id.as_str()) { "*" } else { "" };
            table.add_row(vec![
                marker.to_string(),
                p.id.clone(),
                paint_project(&p.name, Some(p.color.as_str())),
                hours1(p.total_hours),
            ]);
        }
        print!("{}", table.render());
    }

    Ok(())
}
