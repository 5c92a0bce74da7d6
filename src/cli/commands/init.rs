use crate::config::Config;
use crate::db::kv::SqliteKv;
use crate::db::log;
use crate::errors::AppResult;

use crate::cli::parser::Cli;
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database with all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;
    let db_str = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing TimePunch…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database    : {}", &db_str);

    let kv = SqliteKv::open(&db_str)?;

    if let Err(e) = log::ttlog(
        kv.conn(),
        "init",
        "database",
        &format!("Database initialized at {}", &db_str),
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    success(format!("Database initialized at {}", &db_str));
    Ok(())
}
