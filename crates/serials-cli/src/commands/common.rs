use std::io::{self, BufRead, IsTerminal};
use std::path::Path;

use serde::Serialize;
use serials_core::{Entry, ListController, SqliteEntryStore};

use crate::error::CliError;

pub type Controller = ListController<SqliteEntryStore>;

#[derive(Debug, Serialize)]
pub struct EntryListItem {
    pub position: usize,
    pub id: String,
    pub value: String,
    pub created_at: i64,
}

pub fn open_controller(db_path: &Path) -> Result<Controller, CliError> {
    let store = SqliteEntryStore::open(db_path)?;
    tracing::debug!("Using database at {}", db_path.display());
    Ok(ListController::new(store)?)
}

pub fn entry_to_list_item(index: usize, entry: &Entry) -> EntryListItem {
    EntryListItem {
        position: index + 1,
        id: entry.id.to_string(),
        value: entry.value.clone(),
        created_at: entry.created_at,
    }
}

pub fn format_entry_lines(entries: &[Entry]) -> Vec<String> {
    let width = entries.len().to_string().len();
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| format!("{:>width$}  {}", index + 1, entry.value))
        .collect()
}

/// Convert 1-based list positions to 0-based indexes.
pub fn to_indexes(positions: &[usize]) -> Result<Vec<usize>, CliError> {
    positions
        .iter()
        .map(|&position| {
            position
                .checked_sub(1)
                .ok_or(CliError::InvalidPosition(position))
        })
        .collect()
}

/// Lines of piped stdin, without line terminators. `None` on a terminal.
pub fn read_piped_stdin_lines() -> Result<Option<Vec<String>>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let lines = stdin.lock().lines().collect::<Result<Vec<_>, _>>()?;
    Ok(Some(lines.into_iter().map(strip_carriage_return).collect()))
}

pub fn strip_carriage_return(line: String) -> String {
    match line.strip_suffix('\r') {
        Some(stripped) => stripped.to_string(),
        None => line,
    }
}
