use crate::cli::commands::open_tracker;
use crate::config::Config;
use crate::core::projects::ProjectLogic;
use crate::core::session::TrackerEvent;
use crate::errors::AppResult;
use crate::models::entry::format_time;
use crate::ui::messages::{success, warning};

/// `in`
pub fn handle_in(cfg: &Config) -> AppResult<()> {
    let mut tracker = open_tracker(cfg)?;

    match tracker.clock_in()? {
        Some(TrackerEvent::ClockedIn { at }) => {
            success(format!("Clocked in at {}", format_time(&at)));
            if let Some(p) = tracker.current_project() {
                println!("   Project: {}", p.name);
            }
        }
        _ => {
            let since = tracker
                .session()
                .map(|s| format_time(&s.clock_in_time))
                .unwrap_or_default();
            warning(format!("Already clocked in since {since}"));
        }
    }
    Ok(())
}

/// `out`
pub fn handle_out(cfg: &Config) -> AppResult<()> {
    let mut tracker = open_tracker(cfg)?;

    match tracker.clock_out()? {
        Some(TrackerEvent::ClockedOut { entry }) => {
            let project = entry.project_label(|id| ProjectLogic::name_of(tracker.projects(), id));
            success(format!(
                "Clocked out at {}: worked {} ({:.2}h)",
                entry.clock_out, entry.duration, entry.hours_worked
            ));
            println!("   Project: {project}");
        }
        _ => warning("Not clocked in: nothing to record"),
    }
    Ok(())
}
