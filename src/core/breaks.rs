//! Break reminder scheduling: deadline, countdown and the notification
//! collaborator.

use std::fmt;
use std::io::{self, BufRead, Write};

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::core::calculator::duration::format_clock;
use crate::models::break_settings::BreakSettings;
use crate::models::session::Session;
use crate::ui::messages::warning;

pub const REMINDER_TITLE: &str = "TimePunch Break Reminder";
pub const REMINDER_BODY: &str = "Time to take a break! You've been working for a while.";

/// Notification permission as remembered between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permission {
    /// Never asked, or the prompt was dismissed.
    #[default]
    Default,
    Granted,
    Denied,
}

impl Permission {
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::Default => "default",
            Permission::Granted => "granted",
            Permission::Denied => "denied",
        }
    }

    /// Unknown values are read as `Default`, so the user is asked again.
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "granted" => Permission::Granted,
            "denied" => Permission::Denied,
            _ => Permission::Default,
        }
    }
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("notification permission not granted")]
    NotPermitted,
    #[error("notification dispatch failed: {0}")]
    Dispatch(String),
}

/// Platform alert collaborator.
pub trait Notifier {
    /// Ask the user once. Only called while the stored permission is
    /// `Default`.
    fn request_permission(&mut self) -> Permission;

    fn notify(&mut self, title: &str, body: &str) -> Result<(), NotifyError>;
}

/// Terminal implementation: a y/N prompt for permission, a bell and a
/// highlighted line for the alert.
pub struct TerminalNotifier<R: BufRead = io::StdinLock<'static>> {
    input: R,
}

impl TerminalNotifier {
    pub fn stdin() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}

impl<R: BufRead> TerminalNotifier<R> {
    pub fn with_input(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> Notifier for TerminalNotifier<R> {
    fn request_permission(&mut self) -> Permission {
        print!("Allow break reminder notifications? [y/N]: ");
        io::stdout().flush().ok();

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => Permission::Default,
            Ok(_) => match answer.trim().to_ascii_lowercase().as_str() {
                "" => Permission::Default,
                "y" | "yes" => Permission::Granted,
                _ => Permission::Denied,
            },
        }
    }

    fn notify(&mut self, title: &str, body: &str) -> Result<(), NotifyError> {
        print!("\x07");
        warning(format!("{title}: {body}"));
        io::stdout()
            .flush()
            .map_err(|e| NotifyError::Dispatch(e.to_string()))
    }
}

/// When the next reminder is due, if one applies: reminders enabled,
/// clocked in and not on a break.
pub fn next_break_deadline(
    session: Option<&Session>,
    settings: &BreakSettings,
) -> Option<DateTime<Local>> {
    if !settings.enabled {
        return None;
    }
    let session = session?;
    if session.on_break() {
        return None;
    }
    let from = session.breaks.anchor.unwrap_or(session.clock_in_time);
    Some(from + settings.interval.as_duration())
}

/// Countdown display state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Remaining { minutes: i64, seconds: i64 },
    BreakDue,
}

impl Countdown {
    pub fn is_due(&self) -> bool {
        matches!(self, Countdown::BreakDue)
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Remaining { minutes, seconds } => write!(f, "{}:{:02}", minutes, seconds),
            Countdown::BreakDue => write!(f, "Break time!"),
        }
    }
}

pub fn countdown(deadline: DateTime<Local>, now: DateTime<Local>) -> Countdown {
    let ms = deadline.signed_duration_since(now).num_milliseconds();
    if ms <= 0 {
        return Countdown::BreakDue;
    }
    Countdown::Remaining {
        minutes: ms / 60_000,
        seconds: (ms % 60_000) / 1000,
    }
}

/// "M:SS" since the break started.
pub fn break_elapsed(session: &Session, now: DateTime<Local>) -> Option<String> {
    let started = session.breaks.started_at?;
    Some(format_clock(
        now.signed_duration_since(started).num_milliseconds(),
    ))
}
