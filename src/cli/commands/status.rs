use std::io;

use crate::cli::commands::{open_tracker, theme_of};
use crate::config::Config;
use crate::core::breaks::TerminalNotifier;
use crate::core::clock::SystemClock;
use crate::core::session::ClockStatus;
use crate::core::timer::{TimerEngine, TimerSnapshot};
use crate::errors::AppResult;
use crate::models::entry::{format_date, format_time};
use crate::ui::messages::header;
use crate::utils::colors::{RESET, Theme};

/// One-line rendering shared by `status` and `watch`.
pub(crate) fn render_line(snap: &TimerSnapshot, theme: Theme, project: Option<&str>) -> String {
    let color = theme.status(
        snap.status == ClockStatus::Working,
        snap.status == ClockStatus::OnBreak,
    );
    let time = format_time(&snap.now);

    let mut line = match snap.status {
        ClockStatus::Idle => format!("[{time}] {color}Clocked out{RESET}"),
        ClockStatus::Working => format!(
            "[{time}] {color}Working{RESET} {}",
            snap.elapsed_label()
        ),
        ClockStatus::OnBreak => format!(
            "[{time}] {color}On break{RESET} {} (session {})",
            snap.break_elapsed.as_deref().unwrap_or("0:00"),
            snap.elapsed_label()
        ),
    };

    if let Some(name) = project
        && snap.status != ClockStatus::Idle
    {
        line.push_str(&format!(" | {name}"));
    }

    if let Some(cd) = snap.countdown {
        if cd.is_due() {
            line.push_str(&format!(" | {}{cd}{RESET}", theme.alert()));
        } else {
            line.push_str(&format!(" | next break in {cd}"));
        }
    }

    line
}

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut tracker = open_tracker(cfg)?;
    let theme = theme_of(&tracker);

    let notifier = TerminalNotifier::with_input(io::empty());
    let mut engine = TimerEngine::new(SystemClock, notifier, tracker.state());
    let snap = engine.tick();
    if snap.reminder.is_some()
        && let Some(deadline) = snap.next_break
    {
        tracker.mark_reminded(deadline)?;
    }

    header(format_date(&snap.now), theme.accent());
    println!(
        "{}",
        render_line(&snap, theme, tracker.current_project().map(|p| p.name.as_str()))
    );

    if let Some(session) = tracker.session() {
        println!("   Clocked in : {}", format_time(&session.clock_in_time));
    }
    if let Some(at) = snap.next_break {
        println!("   Next break : {}", format_time(&at));
    }
    let settings = &tracker.state().break_settings;
    println!(
        "   Reminders  : {} (every {})",
        if settings.enabled { "on" } else { "off" },
        settings.interval.label()
    );

    Ok(())
}
