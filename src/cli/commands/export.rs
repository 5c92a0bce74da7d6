use std::io;

use chrono::Local;

use crate::cli::commands::open_tracker;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportRequest};
use crate::utils::time::utc_date_stamp;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = cmd
    {
        let mut tracker = open_tracker(cfg)?;
        let stamp = utc_date_stamp(&Local::now());

        let req = ExportRequest {
            format: *format,
            file: file.as_deref(),
            dir: &cfg.export_dir,
            date_stamp: &stamp,
            force: *force,
        };

        let path = ExportLogic::export(
            tracker.entries(),
            tracker.projects(),
            &req,
            &mut io::stdin().lock(),
        )?;

        let message = format!(
            "{} entries exported to {}",
            tracker.entries().len(),
            path.display()
        );
        tracker.store_mut().audit("export", format.as_str(), &message);
    }

    Ok(())
}
