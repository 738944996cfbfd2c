use std::path::Path;

use crate::commands::common::{open_controller, to_indexes};
use crate::error::CliError;

/// Delete by exact value (select, then delete the selection) or by 1-based
/// list position.
pub fn run_delete(values: &[String], positions: &[usize], db_path: &Path) -> Result<(), CliError> {
    if values.is_empty() && positions.is_empty() {
        return Err(CliError::NothingToDelete);
    }

    let mut controller = open_controller(db_path)?;
    let deleted = if positions.is_empty() {
        for value in values {
            controller.select_value(value)?;
        }
        controller.delete_selected()?
    } else {
        controller.delete_at(&to_indexes(positions)?)?
    };

    println!("Deleted {deleted}");
    Ok(())
}
