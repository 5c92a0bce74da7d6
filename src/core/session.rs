//! Session state machine.
//!
//! ```text
//! Idle --clock_in--> ClockedIn(Working) --start_break--> ClockedIn(OnBreak)
//!  ^                        |  ^                                |
//!  +-------clock_out--------+  +-----------end_break------------+
//! ```
//!
//! Every command returns `Ok(None)` when the transition does not apply to
//! the current state. Each accepted transition is persisted before the
//! method returns.

use chrono::{DateTime, Local};

use crate::core::breaks::{Notifier, Permission, next_break_deadline};
use crate::core::calculator::duration::calculate_duration;
use crate::core::clock::Clock;
use crate::core::projects::ProjectLogic;
use crate::core::store::{ClockStore, StoreState};
use crate::db::kv::KeyValueStore;
use crate::errors::AppResult;
use crate::models::break_settings::{BreakInterval, BreakSettings};
use crate::models::entry::Entry;
use crate::models::project::Project;
use crate::models::session::Session;
use crate::utils::time::time_derived_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockStatus {
    Idle,
    Working,
    OnBreak,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrackerEvent {
    ClockedIn {
        at: DateTime<Local>,
    },
    ClockedOut {
        entry: Entry,
    },
    BreakStarted {
        at: DateTime<Local>,
    },
    BreakEnded {
        at: DateTime<Local>,
        next_break: Option<DateTime<Local>>,
    },
    ProjectAdded {
        project: Project,
    },
    ProjectSelected {
        id: Option<String>,
    },
    BreakSettingsChanged {
        settings: BreakSettings,
        permission: Permission,
    },
}

pub struct Tracker<S: KeyValueStore, C: Clock> {
    store: ClockStore<S>,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> Tracker<S, C> {
    pub fn new(store: ClockStore<S>, clock: C) -> Self {
        Self { store, clock }
    }

    /// Load the store from `backend` and wrap it.
    pub fn open(backend: S, clock: C) -> AppResult<Self> {
        Ok(Self::new(ClockStore::load(backend)?, clock))
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &StoreState {
        self.store.state()
    }

    pub fn status(&self) -> ClockStatus {
        match &self.state().session {
            None => ClockStatus::Idle,
            Some(s) if s.on_break() => ClockStatus::OnBreak,
            Some(_) => ClockStatus::Working,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.state().session.as_ref()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.state().entries
    }

    pub fn projects(&self) -> &[Project] {
        &self.state().projects
    }

    pub fn current_project(&self) -> Option<&Project> {
        let id = self.state().current_project.as_deref()?;
        self.projects().iter().find(|p| p.id == id)
    }

    pub fn next_break(&self) -> Option<DateTime<Local>> {
        next_break_deadline(self.session(), &self.state().break_settings)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn backend(&self) -> &S {
        self.store.backend()
    }

    pub fn store_mut(&mut self) -> &mut ClockStore<S> {
        &mut self.store
    }

    pub fn into_store(self) -> ClockStore<S> {
        self.store
    }

    // ── Clock ────────────────────────────────────────────────────────

    pub fn clock_in(&mut self) -> AppResult<Option<TrackerEvent>> {
        if self.state().session.is_some() {
            tracing::debug!("clock_in ignored: already clocked in");
            return Ok(None);
        }

        let now = self.clock.now();
        self.store.state_mut().session = Some(Session::new(now));
        self.store.save_session()?;

        tracing::info!(at = %now.to_rfc3339(), "clocked in");
        self.store
            .audit("clock_in", "session", &format!("Clocked in at {}", now.to_rfc3339()));

        Ok(Some(TrackerEvent::ClockedIn { at: now }))
    }

    pub fn clock_out(&mut self) -> AppResult<Option<TrackerEvent>> {
        let Some(session) = self.state().session.clone() else {
            tracing::debug!("clock_out ignored: not clocked in");
            return Ok(None);
        };

        let now = self.clock.now();
        let duration = calculate_duration(&session.clock_in_time, &now);
        let project = self
            .current_project()
            .map(|p| p.id.clone());

        let id = time_derived_id(&now, self.entries().iter().map(|e| e.id.as_str()));
        let entry = Entry::new(id, &session.clock_in_time, &now, &duration, project);

        let state = self.store.state_mut();
        state.entries.insert(0, entry.clone());
        let touched_project = ProjectLogic::apply_entry(&mut state.projects, &entry);
        state.session = None;

        self.store.save_entries()?;
        if touched_project {
            self.store.save_projects()?;
        }
        self.store.save_session()?;

        tracing::info!(
            duration = %entry.duration,
            hours = entry.hours_worked,
            project = entry.project.as_deref().unwrap_or("-"),
            "clocked out"
        );
        self.store.audit(
            "clock_out",
            entry.project.as_deref().unwrap_or(""),
            &format!("Session {} ({})", entry.duration, entry.date),
        );

        Ok(Some(TrackerEvent::ClockedOut { entry }))
    }

    // ── Breaks ───────────────────────────────────────────────────────

    pub fn start_break(&mut self) -> AppResult<Option<TrackerEvent>> {
        if self.status() != ClockStatus::Working {
            tracing::debug!("start_break ignored: not working");
            return Ok(None);
        }

        let now = self.clock.now();
        if let Some(session) = self.store.state_mut().session.as_mut() {
            session.breaks.started_at = Some(now);
        }
        self.store.save_session()?;

        tracing::info!("break started");
        self.store.audit("break_start", "session", "Break started");
        Ok(Some(TrackerEvent::BreakStarted { at: now }))
    }

    pub fn end_break(&mut self) -> AppResult<Option<TrackerEvent>> {
        if self.status() != ClockStatus::OnBreak {
            tracing::debug!("end_break ignored: not on a break");
            return Ok(None);
        }

        let now = self.clock.now();
        if let Some(session) = self.store.state_mut().session.as_mut() {
            session.breaks.started_at = None;
            session.breaks.anchor = Some(now);
        }
        self.store.save_session()?;

        let next_break = self.next_break();
        tracing::info!(next_break = ?next_break.map(|d| d.to_rfc3339()), "break ended");
        self.store.audit("break_end", "session", "Break ended");
        Ok(Some(TrackerEvent::BreakEnded { at: now, next_break }))
    }

    /// Record that the reminder for `deadline` went out, so later
    /// processes do not repeat it. No-op while idle.
    pub fn mark_reminded(&mut self, deadline: DateTime<Local>) -> AppResult<bool> {
        let Some(session) = self.store.state_mut().session.as_mut() else {
            return Ok(false);
        };
        if session.breaks.reminded == Some(deadline) {
            return Ok(false);
        }
        session.breaks.reminded = Some(deadline);
        self.store.save_session()?;
        Ok(true)
    }

    // ── Break settings ───────────────────────────────────────────────

    /// Turn reminders on, asking for notification permission the first
    /// time only.
    pub fn enable_break_reminders<N: Notifier>(
        &mut self,
        notifier: &mut N,
    ) -> AppResult<Option<TrackerEvent>> {
        if self.state().permission == Permission::Default {
            let answer = notifier.request_permission();
            if answer != Permission::Default {
                self.store.state_mut().permission = answer;
                self.store.save_permission()?;
            }
            tracing::debug!(permission = answer.as_str(), "notification permission requested");
        }

        if self.state().break_settings.enabled {
            return Ok(None);
        }

        self.store.state_mut().break_settings.enabled = true;
        self.store.save_break_settings()?;
        self.store.audit("breaks", "enabled", "Break reminders enabled");
        Ok(Some(self.settings_event()))
    }

    pub fn disable_break_reminders(&mut self) -> AppResult<Option<TrackerEvent>> {
        if !self.state().break_settings.enabled {
            return Ok(None);
        }
        self.store.state_mut().break_settings.enabled = false;
        self.store.save_break_settings()?;
        self.store.audit("breaks", "disabled", "Break reminders disabled");
        Ok(Some(self.settings_event()))
    }

    pub fn set_break_interval(&mut self, minutes: u32) -> AppResult<Option<TrackerEvent>> {
        let interval = BreakInterval::from_minutes(minutes)?;
        if self.state().break_settings.interval == interval {
            return Ok(None);
        }
        self.store.state_mut().break_settings.interval = interval;
        self.store.save_break_settings()?;
        self.store.audit(
            "breaks",
            "interval",
            &format!("Break interval set to {}", interval.label()),
        );
        Ok(Some(self.settings_event()))
    }

    fn settings_event(&self) -> TrackerEvent {
        TrackerEvent::BreakSettingsChanged {
            settings: self.state().break_settings,
            permission: self.state().permission,
        }
    }

    // ── Projects ─────────────────────────────────────────────────────

    pub fn add_project(&mut self, name: &str) -> AppResult<Option<TrackerEvent>> {
        let now = self.clock.now();
        let Some(project) = ProjectLogic::build(name, self.projects(), &now) else {
            tracing::debug!("add_project ignored: blank name");
            return Ok(None);
        };

        self.store.state_mut().projects.push(project.clone());
        self.store.save_projects()?;

        tracing::info!(id = %project.id, name = %project.name, "project added");
        self.store.audit("project_add", &project.id, &project.name);
        Ok(Some(TrackerEvent::ProjectAdded { project }))
    }

    /// Set the project credited at the next clock-out. `None` clears it.
    pub fn select_project(&mut self, id: Option<&str>) -> AppResult<Option<TrackerEvent>> {
        if let Some(id) = id
            && !self.projects().iter().any(|p| p.id == id)
        {
            tracing::debug!(id, "select_project ignored: unknown project");
            return Ok(None);
        }

        let id = id.map(String::from);
        self.store.state_mut().current_project = id.clone();
        self.store.save_current_project()?;

        self.store
            .audit("project_select", id.as_deref().unwrap_or(""), "Active project changed");
        Ok(Some(TrackerEvent::ProjectSelected { id }))
    }

    /// Rebuild every project total from the entry list. Returns how many
    /// totals had drifted.
    pub fn recompute_project_totals(&mut self) -> AppResult<usize> {
        let state = self.store.state_mut();
        let changed = ProjectLogic::recompute(&mut state.projects, &state.entries);
        if changed > 0 {
            self.store.save_projects()?;
            tracing::warn!(changed, "project totals repaired from entries");
        }
        self.store.audit(
            "rebuild",
            "projects",
            &format!("Recomputed project totals ({changed} changed)"),
        );
        Ok(changed)
    }

    // ── Preferences ──────────────────────────────────────────────────

    pub fn set_dark_mode(&mut self, dark: bool) -> AppResult<()> {
        self.store.state_mut().dark_mode = dark;
        self.store.save_dark_mode()
    }
}
