// src/export/text.rs

use crate::errors::AppResult;
use crate::export::model::EntryExport;
use crate::export::notify_export_success;
use crate::ui::messages::info;
use std::fs;
use std::path::Path;

pub const TITLE: &str = "TimePunch Work Log";

/// Title, underline, blank line, then one stanza per entry separated by a
/// blank line.
pub fn entries_to_text(rows: &[EntryExport]) -> String {
    let mut out = String::new();
    out.push_str(TITLE);
    out.push('\n');
    out.push_str(&"=".repeat(TITLE.len()));
    out.push('\n');

    for row in rows {
        out.push('\n');
        out.push_str(&format!("Date: {}\n", row.date));
        out.push_str(&format!("Clock In: {}\n", row.clock_in));
        out.push_str(&format!("Clock Out: {}\n", row.clock_out));
        out.push_str(&format!("Duration: {}\n", row.duration));
        out.push_str(&format!("Hours: {}\n", row.hours_label()));
        out.push_str(&format!("Project: {}\n", row.project));
    }

    out
}

pub(crate) fn export_text(rows: &[EntryExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to text: {}", path.display()));
    fs::write(path, entries_to_text(rows))?;
    notify_export_success("Text", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stanzas_follow_the_title() {
        let rows = vec![
            EntryExport {
                date: "Monday, March 10, 2025".into(),
                clock_in: "09:00:00 AM".into(),
                clock_out: "10:30:00 AM".into(),
                duration: "1h 30m".into(),
                hours_worked: 1.5,
                project: "Alpha".into(),
            },
            EntryExport {
                date: "Sunday, March 9, 2025".into(),
                clock_in: "01:00:00 PM".into(),
                clock_out: "01:10:00 PM".into(),
                duration: "0h 10m".into(),
                hours_worked: 10.0 / 60.0,
                project: "No Project".into(),
            },
        ];
        let text = entries_to_text(&rows);
        let expected = "TimePunch Work Log\n\
                        ==================\n\
                        \n\
                        Date: Monday, March 10, 2025\n\
                        Clock In: 09:00:00 AM\n\
                        Clock Out: 10:30:00 AM\n\
                        Duration: 1h 30m\n\
                        Hours: 1.50\n\
                        Project: Alpha\n\
                        \n\
                        Date: Sunday, March 9, 2025\n\
                        Clock In: 01:00:00 PM\n\
                        Clock Out: 01:10:00 PM\n\
                        Duration: 0h 10m\n\
                        Hours: 0.17\n\
                        Project: No Project\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn no_entries_gives_title_only() {
        assert_eq!(entries_to_text(&[]), "TimePunch Work Log\n==================\n");
    }
}
