use std::path::Path;

use crate::commands::common::open_controller;
use crate::error::CliError;

pub fn run_clear(db_path: &Path) -> Result<(), CliError> {
    let mut controller = open_controller(db_path)?;
    let deleted = controller.delete_all()?;

    println!("Deleted {deleted}");
    Ok(())
}
