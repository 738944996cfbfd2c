//! `SQLite`-backed entry store

use std::path::Path;

use rusqlite::params;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{Entry, EntryId};
use crate::store::{EntryStore, PendingChange};

/// `SQLite` implementation of `EntryStore`
///
/// Queued changes are applied inside a single transaction on commit.
pub struct SqliteEntryStore {
    db: Database,
    pending: Vec<PendingChange>,
}

impl SqliteEntryStore {
    /// Create a store on top of an opened database
    pub const fn new(db: Database) -> Self {
        Self {
            db,
            pending: Vec::new(),
        }
    }

    /// Open (or create) the database file at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Database::open(path)?))
    }

    /// Open an in-memory store
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(Database::open_in_memory()?))
    }

    /// Parse an entry from a database row
    fn parse_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<Entry> {
        let id: String = row.get(0)?;
        let id = id.parse::<EntryId>().map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(error))
        })?;

        Ok(Entry {
            id,
            value: row.get(1)?,
            created_at: row.get(2)?,
        })
    }
}

impl EntryStore for SqliteEntryStore {
    fn insert(&mut self, value: &str) -> Result<Entry> {
        let entry = Entry::new(value);
        self.pending.push(PendingChange::Insert(entry.clone()));
        Ok(entry)
    }

    fn delete(&mut self, id: &EntryId) -> Result<()> {
        self.pending.push(PendingChange::Delete(*id));
        Ok(())
    }

    fn query_all(&self) -> Result<Vec<Entry>> {
        let mut stmt = self
            .db
            .connection()
            .prepare("SELECT id, value, created_at FROM entries ORDER BY seq ASC")?;

        let entries = stmt
            .query_map([], Self::parse_entry)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(entries)
    }

    fn commit(&mut self) -> Result<()> {
        let pending = std::mem::take(&mut self.pending);
        if pending.is_empty() {
            return Ok(());
        }

        // Dropping the transaction on an early return rolls it back
        let tx = self.db.connection_mut().transaction()?;
        for change in &pending {
            match change {
                PendingChange::Insert(entry) => {
                    tx.execute(
                        "INSERT INTO entries (id, value, created_at) VALUES (?1, ?2, ?3)",
                        params![entry.id.as_str(), entry.value, entry.created_at],
                    )?;
                }
                PendingChange::Delete(id) => {
                    let rows =
                        tx.execute("DELETE FROM entries WHERE id = ?1", params![id.as_str()])?;
                    if rows == 0 {
                        return Err(Error::NotFound(id.to_string()));
                    }
                }
            }
        }
        tx.commit()?;

        tracing::debug!("Committed {} change(s)", pending.len());
        Ok(())
    }

    fn discard_pending(&mut self) {
        self.pending.clear();
    }

    fn has_pending_changes(&self) -> bool {
        !self.pending.is_empty()
    }
}
