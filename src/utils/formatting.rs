//! Formatting utilities used for CLI and export outputs.

/// "7.5h" style label with one decimal.
pub fn hours1(hours: f64) -> String {
    format!("{:.1}h", hours)
}

/// Text bar for the 7-day chart: one cell per half hour, capped at `max`.
pub fn bar(hours: f64, max: usize) -> String {
    let cells = ((hours * 2.0).round().max(0.0) as usize).min(max);
    "█".repeat(cells)
}
