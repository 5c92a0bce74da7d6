use crate::cli::commands::{open_tracker, theme_of};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cfg: &Config, dark: bool) -> AppResult<()> {
    let mut tracker = open_tracker(cfg)?;
    tracker.set_dark_mode(dark)?;
    let theme = theme_of(&tracker);
    success(format!("Theme set to {}", theme.name()));
    Ok(())
}
