//! protrak library root.
//! Exposes the CLI parser, the high-level `run()` function and the
//! storage, service and export layers behind it.

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
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Activities { id } => cli::commands::activities::handle(id.as_deref()),
        Commands::Client { action } => cli::commands::client::handle(action, cfg),
        Commands::Project { action } => cli::commands::project::handle(action, cfg),
        Commands::Slot { action } => cli::commands::slot::handle(action, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    db::check_sort_tables()?;

    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
