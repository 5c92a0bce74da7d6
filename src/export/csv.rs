// src/export/csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{EntryExport, HEADERS, entry_to_row};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use csv::Writer;
use std::fs;
use std::path::Path;

/// Render entries as CSV. The header is always written, so zero entries
/// give a header-only document.
pub fn entries_to_csv(rows: &[EntryExport]) -> AppResult<String> {
    let mut wtr = Writer::from_writer(Vec::new());

    wtr.write_record(HEADERS)?;
    for row in rows {
        wtr.write_record(entry_to_row(row))?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::Export(format!("CSV encoding error: {e}")))
}

pub(crate) fn export_csv(rows: &[EntryExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));
    fs::write(path, entries_to_csv(rows)?)?;
    notify_export_success("CSV", path);
    Ok(())
}
