/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const WHITE: &str = "\x1b[37m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";
pub const CYAN: &str = "\x1b[36m";

pub const BRIGHT_RED: &str = "\x1b[91m";
pub const BRIGHT_MAGENTA: &str = "\x1b[95m";

/// Terminal color for a project palette name. Unknown names render
/// uncolored.
pub fn color_for_project(palette_name: &str) -> &'static str {
    match palette_name {
        "red" => RED,
        "blue" => BLUE,
        "green" => GREEN,
        "yellow" => YELLOW,
        "purple" => MAGENTA,
        "pink" => BRIGHT_MAGENTA,
        _ => RESET,
    }
}

pub fn paint_project(name: &str, palette_name: Option<&str>) -> String {
    match palette_name {
        Some(c) => format!("{}●{} {}", color_for_project(c), RESET, name),
        None => format!("{GREY}{name}{RESET}"),
    }
}

/// Display theme chosen with `theme --dark|--light`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub dark: bool,
}

impl Theme {
    pub fn new(dark: bool) -> Self {
        Self { dark }
    }

    pub fn name(&self) -> &'static str {
        if self.dark { "dark" } else { "light" }
    }

    pub fn accent(&self) -> &'static str {
        if self.dark { CYAN } else { BLUE }
    }

    pub fn muted(&self) -> &'static str {
        if self.dark { GREY } else { WHITE }
    }

    /// Working / on-break / idle status colors.
    pub fn status(&self, working: bool, on_break: bool) -> &'static str {
        match (working, on_break) {
            (_, true) => YELLOW,
            (true, false) => GREEN,
            (false, false) => self.muted(),
        }
    }

    pub fn alert(&self) -> &'static str {
        if self.dark { BRIGHT_RED } else { RED }
    }
}

/// Grey out empty placeholders such as "--" or "0h 0m".
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "--" || v == "0h 0m" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
