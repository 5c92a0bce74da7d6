use chrono::{DateTime, Local};

/// The active clock-in. Exists only between clock-in and clock-out.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub clock_in_time: DateTime<Local>,
    pub breaks: BreakState,
}

impl Session {
    pub fn new(clock_in_time: DateTime<Local>) -> Self {
        Self {
            clock_in_time,
            breaks: BreakState::default(),
        }
    }

    pub fn on_break(&self) -> bool {
        self.breaks.started_at.is_some()
    }
}

/// Break sub-state of a session.
///
/// `anchor` is the end of the last break; the next reminder counts from
/// there, or from the clock-in when no break has been taken yet.
/// `reminded` is the last deadline whose reminder was already dispatched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BreakState {
    pub started_at: Option<DateTime<Local>>,
    pub anchor: Option<DateTime<Local>>,
    pub reminded: Option<DateTime<Local>>,
}
