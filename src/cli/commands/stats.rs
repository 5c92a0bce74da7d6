use chrono::Local;

use crate::cli::commands::{open_tracker, theme_of};
use crate::config::Config;
use crate::core::analytics::Analytics;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{RESET, paint_project};
use crate::utils::formatting::{bar, hours1};
use crate::utils::table::pad_visible;

const BAR_MAX: usize = 32;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let tracker = open_tracker(cfg)?;
    let theme = theme_of(&tracker);
    let summary = Analytics::summarize(
        tracker.entries(),
        tracker.projects(),
        Local::now().date_naive(),
    );

    header("Statistics", theme.accent());
    println!("Today          : {}", hours1(summary.today_hours));
    println!("This week      : {}", hours1(summary.this_week));
    println!("Weekly average : {}", hours1(summary.weekly_average));
    println!(
        "Total          : {} over {} sessions",
        hours1(summary.total_hours),
        summary.total_entries
    );

    println!();
    header("Last 7 days", theme.accent());
    for day in &summary.last_7_days {
        println!(
            "{} {}{}{} {}",
            pad_visible(&day.label, 9),
            theme.accent(),
            bar(day.hours, BAR_MAX),
            RESET,
            hours1(day.hours)
        );
    }

    if !summary.by_project.is_empty() {
        println!();
        header("By project", theme.accent());
        for share in &summary.by_project {
            println!(
                "{} {}",
                pad_visible(&paint_project(&share.label, share.color.as_deref()), 24),
                hours1(share.hours)
            );
        }
    }

    Ok(())
}
