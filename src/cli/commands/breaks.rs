use crate::cli::commands::open_tracker;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::breaks::{Permission, TerminalNotifier};
use crate::core::session::TrackerEvent;
use crate::errors::AppResult;
use crate::models::entry::format_time;
use crate::ui::messages::{info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Break {
        start,
        end,
        enable,
        disable,
        interval,
    } = cmd
    else {
        return Ok(());
    };

    let mut tracker = open_tracker(cfg)?;

    if *start {
        match tracker.start_break()? {
            Some(TrackerEvent::BreakStarted { at }) => {
                success(format!("Break started at {}", format_time(&at)))
            }
            _ => warning("Cannot start a break: not clocked in, or already on a break"),
        }
    }

    if *end {
        match tracker.end_break()? {
            Some(TrackerEvent::BreakEnded { at, next_break }) => {
                success(format!("Back to work at {}", format_time(&at)));
                if let Some(next) = next_break {
                    info(format!("Next break reminder at {}", format_time(&next)));
                }
            }
            _ => warning("Not on a break"),
        }
    }

    if let Some(minutes) = interval {
        match tracker.set_break_interval(*minutes)? {
            Some(_) => success(format!(
                "Break interval set to {}",
                tracker.state().break_settings.interval.label()
            )),
            None => info(format!(
                "Break interval already {}",
                tracker.state().break_settings.interval.label()
            )),
        }
    }

    if *enable {
        let mut notifier = TerminalNotifier::stdin();
        match tracker.enable_break_reminders(&mut notifier)? {
            Some(_) => success(format!(
                "Break reminders enabled (every {})",
                tracker.state().break_settings.interval.label()
            )),
            None => info("Break reminders already enabled"),
        }
        match tracker.state().permission {
            Permission::Granted => {}
            Permission::Denied => {
                warning("Notifications are blocked: the countdown still shows \"Break time!\"")
            }
            Permission::Default => info("Notifications not allowed yet; you will be asked again"),
        }
        if let Some(next) = tracker.next_break() {
            info(format!("Next break reminder at {}", format_time(&next)));
        }
    }

    if *disable {
        match tracker.disable_break_reminders()? {
            Some(_) => success("Break reminders disabled"),
            None => info("Break reminders already disabled"),
        }
    }

    Ok(())
}
