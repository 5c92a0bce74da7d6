//! TimePunch library root.
//! Exposes the CLI parser, the high-level run() function and the internal
//! modules (clock store, session tracker, timer engine, exports).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::In => commands::clock::handle_in(cfg),
        Commands::Out => commands::clock::handle_out(cfg),
        Commands::Status => commands::status::handle(cfg),
        Commands::Watch { ticks } => commands::watch::handle(cfg, *ticks),
        Commands::Break { .. } => commands::breaks::handle(&cli.command, cfg),
        Commands::Project { .. } => commands::project::handle(&cli.command, cfg),
        Commands::List { limit } => commands::list::handle(cfg, *limit),
        Commands::Stats => commands::stats::handle(cfg),
        Commands::Export { .. } => commands::export::handle(&cli.command, cfg),
        Commands::Theme { dark, .. } => commands::theme::handle(cfg, *dark),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
        Commands::Db { .. } => commands::db::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is read once; --db wins over the configured database
    let mut cfg = Config::load();
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    utils::logging::enable_logging(cli.log_level.as_deref(), cfg.log_level.as_deref());
    tracing::debug!(database = %cfg.database, test = cli.test, "configuration resolved");

    dispatch(&cli, &cfg)
}
