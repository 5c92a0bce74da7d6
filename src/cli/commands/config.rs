use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{error, success, warning};

use crate::cli::parser::Commands;
use std::path::Path;
use std::process::Command;

fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn run_editor(editor: &str, path: &Path) -> bool {
    matches!(Command::new(editor).arg(path).status(), Ok(s) if s.success())
}

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            println!("📄 Current configuration ({}):\n", path.display());
            println!("{}", cfg.to_yaml()?);
        }

        if *edit_config {
            if !path.exists() {
                warning(format!(
                    "{} does not exist yet; run `timepunch init` first",
                    path.display()
                ));
                return Ok(());
            }

            let fallback = default_editor();
            let requested = editor.clone().unwrap_or_else(|| fallback.clone());

            if run_editor(&requested, &path) {
                success(format!("Configuration file edited using '{requested}'"));
            } else if requested != fallback {
                warning(format!(
                    "Editor '{requested}' not available, falling back to '{fallback}'"
                ));
                if run_editor(&fallback, &path) {
                    success(format!("Configuration file edited using fallback '{fallback}'"));
                } else {
                    error(format!(
                        "Failed to edit configuration file using fallback '{fallback}'"
                    ));
                }
            } else {
                error(format!("Failed to edit configuration file using '{requested}'"));
            }
        }
    }

    Ok(())
}
