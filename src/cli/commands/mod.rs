pub mod breaks;
pub mod clock;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod project;
pub mod stats;
pub mod status;
pub mod theme;
pub mod watch;

use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::session::Tracker;
use crate::db::kv::SqliteKv;
use crate::errors::AppResult;
use crate::utils::colors::Theme;

pub(crate) type CliTracker = Tracker<SqliteKv, SystemClock>;

/// Open the configured database (running pending migrations) and load the
/// clock store.
pub(crate) fn open_tracker(cfg: &Config) -> AppResult<CliTracker> {
    let kv = SqliteKv::open(&cfg.database)?;
    Tracker::open(kv, SystemClock)
}

pub(crate) fn theme_of(tracker: &CliTracker) -> Theme {
    Theme::new(tracker.state().dark_mode)
}
