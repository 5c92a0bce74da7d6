//! Unified application error type.
//! All modules (db, core, export, cli) return AppError to keep the error
//! handling consistent and easy to manage.
//!
//! Invalid clock transitions (clocking out while idle, ending a break that
//! never started) are not errors: the tracker reports them as no-ops.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Input validation
    // ---------------------------
    #[error("Invalid break interval: {0} minutes (allowed: 30, 60, 90, 120)")]
    InvalidInterval(u32),

    #[error("Unknown project: {0}")]
    InvalidProject(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration format error: {0}")]
    ConfigFormat(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Live view
    // ---------------------------
    #[error("Tick callback panicked: {0}")]
    TickPanicked(String),
}

pub type AppResult<T> = Result<T, AppError>;
