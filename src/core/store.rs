//! Clock store: typed state over a string key-value backend.
//!
//! `load` reads every key once; each `save_*` writes back the keys owned
//! by one slice of the state. Callers mutate through [`ClockStore::state_mut`]
//! and save in the same step.

use chrono::{DateTime, Local};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::breaks::Permission;
use crate::db::kv::KeyValueStore;
use crate::errors::AppResult;
use crate::models::break_settings::BreakSettings;
use crate::models::entry::Entry;
use crate::models::project::Project;
use crate::models::session::{BreakState, Session};

pub mod keys {
    pub const CLOCKED_IN: &str = "timepunch-clocked-in";
    pub const CLOCK_TIME: &str = "timepunch-clock-time";
    pub const ENTRIES: &str = "timepunch-entries";
    pub const BREAK_SETTINGS: &str = "timepunch-break-settings";
    pub const PROJECTS: &str = "timepunch-projects";
    pub const CURRENT_PROJECT: &str = "timepunch-current-project";
    pub const DARK_MODE: &str = "timepunch-dark-mode";
    pub const BREAK_START: &str = "timepunch-break-start";
    pub const BREAK_ANCHOR: &str = "timepunch-break-anchor";
    pub const BREAK_REMINDED: &str = "timepunch-break-reminded";
    pub const NOTIFICATION_PERMISSION: &str = "timepunch-notification-permission";
}

#[derive(Debug, Clone, Default)]
pub struct StoreState {
    pub session: Option<Session>,
    /// Newest first.
    pub entries: Vec<Entry>,
    pub projects: Vec<Project>,
    pub current_project: Option<String>,
    pub break_settings: BreakSettings,
    pub dark_mode: bool,
    pub permission: Permission,
}

pub struct ClockStore<S: KeyValueStore> {
    backend: S,
    state: StoreState,
}

impl<S: KeyValueStore> ClockStore<S> {
    /// Read the full state. Absent keys give defaults; malformed values are
    /// logged and treated as absent.
    pub fn load(backend: S) -> AppResult<Self> {
        let state = load_state(&backend)?;
        Ok(Self { backend, state })
    }

    /// Re-read every key, picking up writes made by another process.
    pub fn reload(&mut self) -> AppResult<()> {
        self.state = load_state(&self.backend)?;
        Ok(())
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut StoreState {
        &mut self.state
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Clocked-in flag, clock-in time and break keys.
    pub fn save_session(&mut self) -> AppResult<()> {
        match &self.state.session {
            Some(session) => {
                self.backend.set(keys::CLOCKED_IN, "true")?;
                self.backend
                    .set(keys::CLOCK_TIME, &session.clock_in_time.to_rfc3339())?;
                write_timestamp(&mut self.backend, keys::BREAK_START, session.breaks.started_at)?;
                write_timestamp(&mut self.backend, keys::BREAK_ANCHOR, session.breaks.anchor)?;
                write_timestamp(&mut self.backend, keys::BREAK_REMINDED, session.breaks.reminded)?;
            }
            None => {
                self.backend.remove(keys::CLOCKED_IN)?;
                self.backend.remove(keys::CLOCK_TIME)?;
                self.backend.remove(keys::BREAK_START)?;
                self.backend.remove(keys::BREAK_ANCHOR)?;
                self.backend.remove(keys::BREAK_REMINDED)?;
            }
        }
        Ok(())
    }

    pub fn save_entries(&mut self) -> AppResult<()> {
        write_json(&mut self.backend, keys::ENTRIES, &self.state.entries)
    }

    pub fn save_projects(&mut self) -> AppResult<()> {
        write_json(&mut self.backend, keys::PROJECTS, &self.state.projects)
    }

    pub fn save_current_project(&mut self) -> AppResult<()> {
        match &self.state.current_project {
            Some(id) => self.backend.set(keys::CURRENT_PROJECT, id),
            None => self.backend.remove(keys::CURRENT_PROJECT),
        }
    }

    pub fn save_break_settings(&mut self) -> AppResult<()> {
        write_json(
            &mut self.backend,
            keys::BREAK_SETTINGS,
            &self.state.break_settings,
        )
    }

    pub fn save_dark_mode(&mut self) -> AppResult<()> {
        let flag = if self.state.dark_mode { "true" } else { "false" };
        self.backend.set(keys::DARK_MODE, flag)
    }

    pub fn save_permission(&mut self) -> AppResult<()> {
        self.backend
            .set(keys::NOTIFICATION_PERMISSION, self.state.permission.as_str())
    }

    pub fn audit(&mut self, operation: &str, target: &str, message: &str) {
        self.backend.audit(operation, target, message);
    }
}

fn load_state<S: KeyValueStore>(backend: &S) -> AppResult<StoreState> {
    let state = StoreState {
        session: load_session(backend)?,
        entries: read_json(backend, keys::ENTRIES)?.unwrap_or_default(),
        projects: read_json(backend, keys::PROJECTS)?.unwrap_or_default(),
        current_project: backend
            .get(keys::CURRENT_PROJECT)?
            .filter(|id| !id.trim().is_empty()),
        break_settings: read_json(backend, keys::BREAK_SETTINGS)?.unwrap_or_default(),
        dark_mode: backend.get(keys::DARK_MODE)?.as_deref() == Some("true"),
        permission: backend
            .get(keys::NOTIFICATION_PERMISSION)?
            .map(|raw| Permission::from_str_lossy(&raw))
            .unwrap_or_default(),
    };

    tracing::debug!(
        clocked_in = state.session.is_some(),
        entries = state.entries.len(),
        projects = state.projects.len(),
        "clock store loaded"
    );

    Ok(state)
}

fn load_session<S: KeyValueStore>(backend: &S) -> AppResult<Option<Session>> {
    if backend.get(keys::CLOCKED_IN)?.as_deref() != Some("true") {
        return Ok(None);
    }

    let Some(clock_in_time) = read_timestamp(backend, keys::CLOCK_TIME)? else {
        tracing::warn!("clocked-in flag without a readable clock-in time, loading as idle");
        return Ok(None);
    };

    Ok(Some(Session {
        clock_in_time,
        breaks: BreakState {
            started_at: read_timestamp(backend, keys::BREAK_START)?,
            anchor: read_timestamp(backend, keys::BREAK_ANCHOR)?,
            reminded: read_timestamp(backend, keys::BREAK_REMINDED)?,
        },
    }))
}

fn read_json<S: KeyValueStore, T: DeserializeOwned>(backend: &S, key: &str) -> AppResult<Option<T>> {
    let Some(raw) = backend.get(key)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(v) => Ok(Some(v)),
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring malformed stored value");
            Ok(None)
        }
    }
}

fn write_json<S: KeyValueStore, T: Serialize + ?Sized>(
    backend: &mut S,
    key: &str,
    value: &T,
) -> AppResult<()> {
    let json = serde_json::to_string(value)?;
    backend.set(key, &json)
}

fn read_timestamp<S: KeyValueStore>(backend: &S, key: &str) -> AppResult<Option<DateTime<Local>>> {
    let Some(raw) = backend.get(key)? else {
        return Ok(None);
    };

    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(dt) => Ok(Some(dt.with_timezone(&Local))),
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring malformed stored timestamp");
            Ok(None)
        }
    }
}

fn write_timestamp<S: KeyValueStore>(
    backend: &mut S,
    key: &str,
    value: Option<DateTime<Local>>,
) -> AppResult<()> {
    match value {
        Some(dt) => backend.set(key, &dt.to_rfc3339()),
        None => backend.remove(key),
    }
}
