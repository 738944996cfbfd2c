use std::path::Path;

use crate::commands::common::{open_controller, read_piped_stdin_lines};
use crate::error::CliError;

/// Add each value in order; stops at the first failure.
///
/// With no values, one value per line is read from piped stdin. Empty values
/// are skipped.
pub fn run_add(values: &[String], db_path: &Path) -> Result<(), CliError> {
    let values = if values.is_empty() {
        read_piped_stdin_lines()?.unwrap_or_default()
    } else {
        values.to_vec()
    };

    let mut controller = open_controller(db_path)?;
    let mut added = 0usize;
    for value in &values {
        if let Some(entry) = controller.add(value)? {
            println!("{}", entry.value);
            added += 1;
        }
    }

    if added == 0 {
        tracing::info!("Nothing to add");
    }
    Ok(())
}
