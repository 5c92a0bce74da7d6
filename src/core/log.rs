use crate::db::log::{LogRow, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::table::strip_ansi;
use ansi_term::Colour;

const MAX_OP_WIDTH: usize = 40;

/// Color of an operation in the printed log.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "clock_in" => Colour::Green,
        "clock_out" => Colour::Red,
        "break_start" | "break_end" | "breaks" => Colour::Yellow,
        "project_add" | "project_select" => Colour::Blue,
        "export" => Colour::Cyan,
        "migration_applied" | "rebuild" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `operation (target)`, truncated to the column width.
fn op_target(row: &LogRow) -> String {
    let full = if row.target.is_empty() {
        row.operation.clone()
    } else {
        format!("{} ({})", row.operation, row.target)
    };
    if full.chars().count() > MAX_OP_WIDTH {
        let mut s: String = full.chars().take(MAX_OP_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        full
    }
}

/// One printed line; only the operation word is colored.
pub fn format_row(row: &LogRow, id_w: usize, date_w: usize, op_w: usize) -> String {
    let date = chrono::DateTime::parse_from_rfc3339(&row.date)
        .map(|dt| dt.format("%FT%T%:z").to_string())
        .unwrap_or_else(|_| row.date.clone());

    let visible = op_target(row);
    let color = color_for_operation(&row.operation);
    let colored = match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    };
    let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

    format!(
        "{:>id_w$}: {:<date_w$} | {}{} => {}",
        row.id,
        date,
        colored,
        padding,
        row.message,
        id_w = id_w,
        date_w = date_w
    )
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let rows = load_log(&pool.conn)?;

        println!("📜 Internal log:\n");
        if rows.is_empty() {
            println!("(empty)");
            return Ok(());
        }

        let id_w = rows
            .iter()
            .map(|r| r.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = rows.iter().map(|r| r.date.len()).max().unwrap_or(10);
        let op_w = rows
            .iter()
            .map(|r| op_target(r).chars().count())
            .max()
            .unwrap_or(10);

        for row in &rows {
            println!("{}", format_row(row, id_w, date_w, op_w));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(op: &str, target: &str) -> LogRow {
        LogRow {
            id: 7,
            date: "2025-03-10T09:00:00+01:00".into(),
            operation: op.into(),
            target: target.into(),
            message: "Clocked in".into(),
        }
    }

    #[test]
    fn row_layout() {
        let line = strip_ansi(&format_row(&row("clock_in", "session"), 2, 25, 20));
        assert_eq!(
            line,
            " 7: 2025-03-10T09:00:00+01:00 | clock_in (session)   => Clocked in"
        );
    }

    #[test]
    fn long_targets_are_truncated() {
        let long = "x".repeat(80);
        let shown = op_target(&row("project_add", &long));
        assert_eq!(shown.chars().count(), MAX_OP_WIDTH);
        assert!(shown.ends_with("..."));
    }
}
