// src/export/logic.rs

use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::csv::export_csv;
use crate::export::fs_utils::{ensure_parent, ensure_writable};
use crate::export::model::{EntryExport, build_rows};
use crate::export::text::export_text;
use crate::models::entry::Entry;
use crate::models::project::Project;
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;

use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Where and how to write an export.
pub struct ExportRequest<'a> {
    pub format: ExportFormat,
    /// Explicit output file; otherwise `timepunch-log-<date>.<ext>` in `dir`.
    pub file: Option<&'a str>,
    pub dir: &'a str,
    /// UTC date stamp used in the default file name.
    pub date_stamp: &'a str,
    pub force: bool,
}

impl ExportRequest<'_> {
    pub fn target(&self) -> PathBuf {
        match self.file {
            Some(f) => expand_tilde(f),
            None => expand_tilde(self.dir).join(default_file_name(self.format, self.date_stamp)),
        }
    }
}

pub fn default_file_name(format: ExportFormat, date_stamp: &str) -> String {
    format!("timepunch-log-{date_stamp}.{}", format.extension())
}

pub struct ExportLogic;

impl ExportLogic {
    /// Write every entry (newest first) and return the path written.
    pub fn export<R: BufRead>(
        entries: &[Entry],
        projects: &[Project],
        req: &ExportRequest<'_>,
        confirm: &mut R,
    ) -> AppResult<PathBuf> {
        let path = req.target();
        ensure_writable(&path, req.force, confirm)?;
        ensure_parent(&path)?;

        let rows = build_rows(entries, projects);
        if rows.is_empty() {
            warning("No entries recorded yet: writing an empty log.");
        }

        write(req.format, &rows, &path)?;
        tracing::info!(
            path = %path.display(),
            rows = rows.len(),
            format = req.format.as_str(),
            "export written"
        );
        Ok(path)
    }
}

fn write(format: ExportFormat, rows: &[EntryExport], path: &Path) -> AppResult<()> {
    match format {
        ExportFormat::Csv => export_csv(rows, path),
        ExportFormat::Txt => export_text(rows, path),
    }
}
