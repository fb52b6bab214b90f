//! shiftdesk library root.
//! Exposes the CLI parser, the high-level run() function and the domain modules
//! (scheduling, imports, exports and the report engine).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod import;
pub mod models;
pub mod report;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let cmd = &cli.command;
    match cmd {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(cmd, cfg),
        Commands::Log { .. } => cli::commands::log::handle(cmd, cfg),
        Commands::Employee { .. } => cli::commands::employee::handle(cmd, cfg),
        Commands::Shift { .. } => cli::commands::shift::handle(cmd, cfg),
        Commands::Leave { .. } => cli::commands::leave::handle(cmd, cfg),
        Commands::Holiday { .. } => cli::commands::holiday::handle(cmd, cfg),
        Commands::Task { .. } => cli::commands::task::handle(cmd, cfg),
        Commands::Allowance { .. } => cli::commands::allowance::handle(cmd, cfg),
        Commands::Tardy { .. } => cli::commands::tardy::handle(cmd, cfg),
        Commands::Import { .. } => cli::commands::import::handle(cmd, cfg),
        Commands::Export { .. } => cli::commands::export::handle(cmd, cfg),
        Commands::Template { .. } => cli::commands::template::handle(cmd, cfg),
        Commands::Report { .. } => cli::commands::report::handle(cmd, cfg),
        Commands::List { .. } => cli::commands::list::handle(cmd, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Test runs must not depend on whatever config the machine has
    let mut cfg = if cli.test {
        Config::default()
    } else {
        Config::load()?
    };

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
