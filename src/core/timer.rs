//! Timer engine: derived display values for the current session.
//!
//! The engine is wall-clock based and has no thread of its own. Callers
//! invoke [`TimerEngine::tick`] whenever they want a fresh snapshot, either
//! once (`status`) or from a [`crate::core::ticker`] every second (`watch`).

use chrono::{DateTime, Local};

use crate::core::breaks::{
    Countdown, Notifier, Permission, REMINDER_BODY, REMINDER_TITLE, break_elapsed, countdown,
    next_break_deadline,
};
use crate::core::calculator::duration::{DurationInfo, calculate_duration};
use crate::core::clock::Clock;
use crate::core::session::ClockStatus;
use crate::core::store::StoreState;
use crate::models::break_settings::BreakSettings;
use crate::models::session::Session;

/// What happened to the reminder on the tick that reached the deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderOutcome {
    Delivered,
    /// Dispatch failed; the display still switches to "break due".
    Failed,
    NotPermitted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimerSnapshot {
    pub now: DateTime<Local>,
    pub status: ClockStatus,
    pub elapsed: Option<DurationInfo>,
    pub next_break: Option<DateTime<Local>>,
    pub countdown: Option<Countdown>,
    pub break_elapsed: Option<String>,
    pub reminder: Option<ReminderOutcome>,
}

impl TimerSnapshot {
    pub fn elapsed_label(&self) -> String {
        self.elapsed
            .as_ref()
            .map(|d| d.formatted.clone())
            .unwrap_or_else(|| "0h 0m".to_string())
    }

    /// True on the tick that delivered the reminder.
    pub fn reminder_fired(&self) -> bool {
        self.reminder == Some(ReminderOutcome::Delivered)
    }
}

pub struct TimerEngine<C: Clock, N: Notifier> {
    clock: C,
    notifier: N,
    session: Option<Session>,
    settings: BreakSettings,
    permission: Permission,
    /// Deadline whose reminder has already been handled, here or by an
    /// earlier process.
    handled_deadline: Option<DateTime<Local>>,
}

impl<C: Clock, N: Notifier> TimerEngine<C, N> {
    pub fn new(clock: C, notifier: N, state: &StoreState) -> Self {
        Self {
            clock,
            notifier,
            session: state.session.clone(),
            settings: state.break_settings,
            permission: state.permission,
            handled_deadline: reminded_deadline(state),
        }
    }

    /// Refresh the inputs after a state transition.
    pub fn sync(&mut self, state: &StoreState) {
        self.session = state.session.clone();
        self.settings = state.break_settings;
        self.permission = state.permission;
        if let Some(deadline) = reminded_deadline(state) {
            self.handled_deadline = Some(deadline);
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn next_break(&self) -> Option<DateTime<Local>> {
        next_break_deadline(self.session.as_ref(), &self.settings)
    }

    pub fn tick(&mut self) -> TimerSnapshot {
        let now = self.clock.now();

        let status = match &self.session {
            None => ClockStatus::Idle,
            Some(s) if s.on_break() => ClockStatus::OnBreak,
            Some(_) => ClockStatus::Working,
        };

        let elapsed = self
            .session
            .as_ref()
            .map(|s| calculate_duration(&s.clock_in_time, &now));

        let next_break = self.next_break();
        let countdown = next_break.map(|deadline| countdown(deadline, now));

        let mut reminder = None;
        if let (Some(deadline), Some(Countdown::BreakDue)) = (next_break, countdown)
            && self.handled_deadline != Some(deadline)
        {
            self.handled_deadline = Some(deadline);
            reminder = Some(self.dispatch_reminder());
        }

        let break_elapsed = self
            .session
            .as_ref()
            .and_then(|s| break_elapsed(s, now));

        TimerSnapshot {
            now,
            status,
            elapsed,
            next_break,
            countdown,
            break_elapsed,
            reminder,
        }
    }

    fn dispatch_reminder(&mut self) -> ReminderOutcome {
        if self.permission != Permission::Granted {
            tracing::debug!("break due, notifications not permitted");
            return ReminderOutcome::NotPermitted;
        }
        match self.notifier.notify(REMINDER_TITLE, REMINDER_BODY) {
            Ok(()) => ReminderOutcome::Delivered,
            Err(e) => {
                tracing::debug!(error = %e, "break reminder not delivered");
                ReminderOutcome::Failed
            }
        }
    }
}

fn reminded_deadline(state: &StoreState) -> Option<DateTime<Local>> {
    state.session.as_ref().and_then(|s| s.breaks.reminded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::breaks::NotifyError;
    use crate::core::clock::ManualClock;
    use crate::models::break_settings::BreakInterval;
    use chrono::{Duration, TimeZone};

    #[derive(Default)]
    struct CountingNotifier {
        sent: Vec<String>,
        fail: bool,
    }

    impl Notifier for CountingNotifier {
        fn request_permission(&mut self) -> Permission {
            Permission::Granted
        }

        fn notify(&mut self, title: &str, _body: &str) -> Result<(), NotifyError> {
            if self.fail {
                return Err(NotifyError::Dispatch("no display".into()));
            }
            self.sent.push(title.to_string());
            Ok(())
        }
    }

    fn t0() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
    }

    fn working_state(interval: BreakInterval, permission: Permission) -> StoreState {
        StoreState {
            session: Some(Session::new(t0())),
            break_settings: BreakSettings {
                enabled: true,
                interval,
            },
            permission,
            ..StoreState::default()
        }
    }

    #[test]
    fn idle_snapshot_has_no_derived_values() {
        let clock = ManualClock::new(t0());
        let mut engine =
            TimerEngine::new(clock, CountingNotifier::default(), &StoreState::default());
        let snap = engine.tick();
        assert_eq!(snap.status, ClockStatus::Idle);
        assert!(snap.elapsed.is_none());
        assert!(snap.countdown.is_none());
        assert_eq!(snap.elapsed_label(), "0h 0m");
    }

    #[test]
    fn elapsed_follows_the_virtual_clock() {
        let clock = ManualClock::new(t0());
        let state = StoreState {
            session: Some(Session::new(t0())),
            ..StoreState::default()
        };
        let mut engine = TimerEngine::new(clock.clone(), CountingNotifier::default(), &state);

        clock.advance(Duration::minutes(75) + Duration::seconds(42));
        let snap = engine.tick();
        assert_eq!(snap.elapsed_label(), "1h 15m");
        assert!(snap.countdown.is_none());
    }

    #[test]
    fn thirty_minute_reminder_becomes_due_and_fires_once() {
        let clock = ManualClock::new(t0());
        let state = working_state(BreakInterval::Minutes30, Permission::Granted);
        let mut engine = TimerEngine::new(clock.clone(), CountingNotifier::default(), &state);

        assert_eq!(engine.next_break(), Some(t0() + Duration::minutes(30)));

        clock.advance(Duration::minutes(29) + Duration::seconds(30));
        let snap = engine.tick();
        assert_eq!(
            snap.countdown,
            Some(Countdown::Remaining {
                minutes: 0,
                seconds: 30
            })
        );
        assert!(snap.reminder.is_none());

        clock.set(t0() + Duration::minutes(30) + Duration::seconds(1));
        let snap = engine.tick();
        assert_eq!(snap.countdown, Some(Countdown::BreakDue));
        assert_eq!(snap.reminder, Some(ReminderOutcome::Delivered));
        assert!(snap.reminder_fired());

        clock.advance(Duration::seconds(1));
        let snap = engine.tick();
        assert_eq!(snap.countdown, Some(Countdown::BreakDue));
        assert!(snap.reminder.is_none());
        assert_eq!(engine.notifier().sent.len(), 1);
    }

    #[test]
    fn due_without_permission_still_shows_break_time() {
        let clock = ManualClock::new(t0() + Duration::hours(2));
        let state = working_state(BreakInterval::Minutes60, Permission::Denied);
        let mut engine = TimerEngine::new(clock, CountingNotifier::default(), &state);
        let snap = engine.tick();
        assert_eq!(snap.countdown.map(|c| c.to_string()).as_deref(), Some("Break time!"));
        assert_eq!(snap.reminder, Some(ReminderOutcome::NotPermitted));
        assert!(engine.notifier().sent.is_empty());
    }

    #[test]
    fn notification_failure_is_tolerated() {
        let clock = ManualClock::new(t0() + Duration::hours(3));
        let state = working_state(BreakInterval::Minutes90, Permission::Granted);
        let notifier = CountingNotifier {
            fail: true,
            ..Default::default()
        };
        let mut engine = TimerEngine::new(clock, notifier, &state);
        assert_eq!(engine.tick().reminder, Some(ReminderOutcome::Failed));
    }

    #[test]
    fn on_break_hides_countdown_and_shows_break_clock() {
        let clock = ManualClock::new(t0() + Duration::minutes(40));
        let mut state = working_state(BreakInterval::Minutes30, Permission::Granted);
        if let Some(s) = state.session.as_mut() {
            s.breaks.started_at = Some(t0() + Duration::minutes(35));
        }
        let mut engine = TimerEngine::new(clock.clone(), CountingNotifier::default(), &state);
        let snap = engine.tick();
        assert_eq!(snap.status, ClockStatus::OnBreak);
        assert!(snap.countdown.is_none());
        assert_eq!(snap.break_elapsed.as_deref(), Some("5:00"));

        // break ends at 09:45; next reminder counts from there
        if let Some(s) = state.session.as_mut() {
            s.breaks.started_at = None;
            s.breaks.anchor = Some(t0() + Duration::minutes(45));
        }
        engine.sync(&state);
        clock.set(t0() + Duration::minutes(46));
        let snap = engine.tick();
        assert_eq!(
            snap.countdown,
            Some(Countdown::Remaining {
                minutes: 29,
                seconds: 0
            })
        );
    }

    #[test]
    fn deadline_reminded_earlier_is_not_repeated() {
        let clock = ManualClock::new(t0() + Duration::minutes(31));
        let mut state = working_state(BreakInterval::Minutes30, Permission::Granted);
        if let Some(s) = state.session.as_mut() {
            s.breaks.reminded = Some(t0() + Duration::minutes(30));
        }

        let mut engine = TimerEngine::new(clock, CountingNotifier::default(), &state);
        let snap = engine.tick();
        assert_eq!(snap.countdown, Some(Countdown::BreakDue));
        assert!(snap.reminder.is_none());
        assert!(engine.notifier().sent.is_empty());
    }
}
