use crate::cli::commands::open_tracker;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db { rebuild, info } = cmd {
        let mut tracker = open_tracker(cfg)?;

        //
        // 1) REBUILD
        //
        if *rebuild {
            println!("{}▶ Recomputing project totals…{}", CYAN, RESET);
            let changed = tracker.recompute_project_totals()?;
            if changed == 0 {
                println!("{}✔ Project totals already consistent.{}\n", GREEN, RESET);
            } else {
                println!(
                    "{}✔ Repaired {} project total(s).{}\n",
                    YELLOW, changed, RESET
                );
            }
        }

        //
        // 2) INFO
        //
        if *info {
            stats::print_db_info(
                tracker.backend().pool(),
                &cfg.database,
                tracker.entries().len(),
            )?;
        }
    }

    Ok(())
}
