use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "serials")]
#[command(about = "Keep a list of unique serial numbers and export it as CSV")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Optional path to the JSON config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Quick add: serials "SN-0001"
    #[arg(value_name = "SERIAL")]
    pub serial: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add serial numbers (reads one per line from piped stdin when none are given)
    #[command(alias = "new")]
    Add {
        /// Serial numbers, stored exactly as typed
        values: Vec<String>,
    },
    /// List serial numbers in insertion order
    #[command(alias = "ls")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete serial numbers by value or by list position
    #[command(alias = "rm")]
    Delete {
        /// Serial numbers to delete
        values: Vec<String>,
        /// 1-based list positions to delete (as shown by `serials list`)
        #[arg(long = "at", value_name = "POS", value_delimiter = ',', conflicts_with = "values")]
        positions: Vec<usize>,
    },
    /// Delete every serial number
    Clear,
    /// Export the list as CSV
    Export {
        /// Output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
        /// Stage the file in the share directory instead
        #[arg(long, conflicts_with = "output")]
        share: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}
