//! Error types for serials-core

use thiserror::Error;

/// Result type alias using serials-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in serials-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Add rejected because the value is already in the list
    #[error("Serial number already exists: {0}")]
    DuplicateEntry(String),

    /// Store commit failed
    #[error("Failed to save changes: {0}")]
    Persistence(String),

    /// File or share write failed
    #[error("Export failed: {0}")]
    Export(String),

    /// Entry not found
    #[error("Entry not found: {0}")]
    NotFound(String),

    /// Position outside the current list
    #[error("Position {position} is out of range (list has {len} entries)")]
    PositionOutOfRange { position: usize, len: usize },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// `SQLite` error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
