use crate::export::ExportFormat;
use clap::{ArgGroup, Parser, Subcommand};

/// Command-line interface definition for TimePunch
/// Punch-clock CLI: clock in and out, take breaks, attribute time to projects
#[derive(Parser)]
#[command(
    name = "timepunch",
    version = env!("CARGO_PKG_VERSION"),
    about = "A punch-clock time tracker: clock in/out, break reminders and per-project hours",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Diagnostic log filter (e.g. info, debug); overrides RUST_LOG
    #[arg(global = true, long = "log-level", value_name = "FILTER")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Clock in: start a work session now
    In,

    /// Clock out: close the running session and record an entry
    Out,

    /// Show the current session, elapsed time and next break
    Status,

    /// Live view refreshed every tick until interrupted
    Watch {
        #[arg(long, value_name = "N", help = "Stop after N ticks")]
        ticks: Option<u64>,
    },

    /// Take breaks and configure break reminders
    #[command(group(
        ArgGroup::new("break_action")
            .required(true)
            .args(["start", "end", "enable", "disable", "interval"])
    ))]
    Break {
        #[arg(long, help = "Start a break")]
        start: bool,

        #[arg(long, help = "End the current break")]
        end: bool,

        #[arg(long, help = "Enable break reminders")]
        enable: bool,

        #[arg(long, help = "Disable break reminders")]
        disable: bool,

        #[arg(
            long,
            value_name = "MINUTES",
            help = "Reminder interval in minutes: 30, 60, 90 or 120"
        )]
        interval: Option<u32>,
    },

    /// Manage projects and the active project
    #[command(group(
        ArgGroup::new("project_action")
            .required(true)
            .args(["add", "select", "clear", "list"])
    ))]
    Project {
        #[arg(long, value_name = "NAME", help = "Create a project")]
        add: Option<String>,

        #[arg(
            long,
            value_name = "ID_OR_NAME",
            help = "Credit the next clock-out to this project"
        )]
        select: Option<String>,

        #[arg(long, help = "Clear the active project")]
        clear: bool,

        #[arg(long, help = "List projects with their total hours")]
        list: bool,
    },

    /// List recorded entries, newest first
    List {
        #[arg(long, short = 'n', value_name = "N", help = "Show only the N newest entries")]
        limit: Option<usize>,
    },

    /// Show today, this week, weekly average and per-project hours
    Stats,

    /// Export the work log
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(
            long,
            value_name = "FILE",
            help = "Output file (default: timepunch-log-<date>.<ext> in export_dir)"
        )]
        file: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Switch between dark and light display themes
    #[command(group(
        ArgGroup::new("theme_choice")
            .required(true)
            .args(["dark", "light"])
    ))]
    Theme {
        #[arg(long)]
        dark: bool,

        #[arg(long)]
        light: bool,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Print the internal operation log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Database maintenance
    Db {
        #[arg(long = "rebuild", help = "Recompute project totals from entries")]
        rebuild: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn break_needs_exactly_one_action() {
        assert!(Cli::try_parse_from(["timepunch", "break"]).is_err());
        assert!(Cli::try_parse_from(["timepunch", "break", "--start", "--end"]).is_err());
        assert!(Cli::try_parse_from(["timepunch", "break", "--interval", "30"]).is_ok());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["timepunch", "status", "--db", "x.sqlite", "--test"]).unwrap();
        assert_eq!(cli.db.as_deref(), Some("x.sqlite"));
        assert!(cli.test);
    }
}
