// src/export/mod.rs

pub mod csv;
mod fs_utils;
pub mod logic;
pub mod model;
pub mod text;

pub use logic::{ExportLogic, ExportRequest};
pub use model::EntryExport;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for every export format.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Txt,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Txt => "txt",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}
