use std::io;
use std::time::Duration;

use crate::cli::commands::status::render_line;
use crate::cli::commands::{open_tracker, theme_of};
use crate::config::Config;
use crate::core::breaks::TerminalNotifier;
use crate::core::clock::SystemClock;
use crate::core::ticker::{TickControl, TimerView};
use crate::core::timer::TimerEngine;
use crate::errors::AppResult;
use crate::ui::messages::info;

/// Live status: one line per tick. Stops after `ticks` ticks, or runs
/// until the process is interrupted.
pub fn handle(cfg: &Config, ticks: Option<u64>) -> AppResult<()> {
    let mut tracker = open_tracker(cfg)?;
    let theme = theme_of(&tracker);
    let notifier = TerminalNotifier::with_input(io::empty());
    let mut engine = TimerEngine::new(SystemClock, notifier, tracker.state());

    let period = Duration::from_millis(cfg.tick_millis.max(1));
    if ticks.is_none() {
        info("Watching; press Ctrl-C to stop.");
    }

    let mut view = TimerView::default();
    view.start(period, move |n| {
        // another process may have clocked out or started a break
        match tracker.store_mut().reload() {
            Ok(()) => engine.sync(tracker.state()),
            Err(e) => tracing::warn!(error = %e, "could not refresh clock state"),
        }

        let snap = engine.tick();
        if snap.reminder.is_some()
            && let Some(deadline) = snap.next_break
            && let Err(e) = tracker.mark_reminded(deadline)
        {
            tracing::warn!(error = %e, "could not record break reminder");
        }
        let project = tracker.current_project().map(|p| p.name.as_str());
        println!("{}", render_line(&snap, theme, project));

        match ticks {
            Some(limit) if n + 1 >= limit => TickControl::Stop,
            _ => TickControl::Continue,
        }
    });
    view.wait()?;

    Ok(())
}
