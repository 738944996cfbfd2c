//! Serials CLI - keep a list of unique serial numbers from the command line
//!
//! Composition root: wires the `SQLite` entry store and an export sink into
//! the list controller and prints its state.

mod cli;
mod commands;
mod config;
mod error;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::clear::run_clear;
use crate::commands::completions::run_completions;
use crate::commands::delete::run_delete;
use crate::commands::export::{run_export, ExportTarget};
use crate::commands::list::run_list;
use crate::config::{default_config_path, CliConfig};
use crate::error::CliError;

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("serials=info,serials_core=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let config = CliConfig::load_from_path(&config_path)?;
    let db_path = config.resolve_db_path(cli.db_path);

    match cli.command {
        Some(Commands::Add { values }) => run_add(&values, &db_path)?,
        Some(Commands::List { json }) => run_list(json, &db_path)?,
        Some(Commands::Delete { values, positions }) => {
            run_delete(&values, &positions, &db_path)?;
        }
        Some(Commands::Clear) => run_clear(&db_path)?,
        Some(Commands::Export { output, share }) => {
            let share_dir = config.resolve_share_dir();
            let target = ExportTarget::from_args(output.as_deref(), share, &share_dir);
            run_export(target, &db_path)?;
        }
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        None => {
            // Quick add mode: serials "SN-0001"
            if let Some(serial) = cli.serial {
                run_add(&[serial], &db_path)?;
            } else {
                Cli::command().print_help()?;
                println!();
            }
        }
    }

    Ok(())
}
