//! Database connection management

use crate::error::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

use super::migrations;

/// Database wrapper for the local `SQLite` file
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// Open a database at the given path, creating it (and its parent
    /// directory) if it doesn't exist
    ///
    /// Runs migrations automatically.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        let database = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        database.configure()?;
        database.migrate()?;
        tracing::debug!("Opened database at {}", path.display());
        Ok(database)
    }

    /// Open an in-memory database (useful for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let database = Self { conn, path: None };
        database.configure()?;
        database.migrate()?;
        Ok(database)
    }

    /// Configure `SQLite` for a single local writer
    fn configure(&self) -> Result<()> {
        // In-memory databases report "memory" and cannot switch to WAL
        match self
            .conn
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| {
                row.get::<_, String>(0)
            }) {
            Ok(mode) => tracing::debug!("Journal mode: {mode}"),
            Err(error) => tracing::debug!("Could not enable WAL journal mode: {error}"),
        }
        if let Err(error) = self.conn.pragma_update(None, "synchronous", "NORMAL") {
            tracing::warn!("Failed to set synchronous=NORMAL, keeping SQLite default: {error}");
        }
        self.conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(())
    }

    /// Run database migrations
    fn migrate(&self) -> Result<()> {
        migrations::run(&self.conn)
    }

    /// Path of the backing file, `None` for in-memory databases
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get a reference to the underlying connection
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Get a mutable reference to the underlying connection (for transactions)
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.path().is_none());

        let val: i32 = db
            .connection()
            .query_row("SELECT 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(val, 1);
    }

    #[test]
    fn test_open_creates_parent_directory() {
        let tmp = tempdir().unwrap();
        let db_path = tmp.path().join("nested").join("serials.db");

        let db = Database::open(&db_path).unwrap();
        assert_eq!(db.path(), Some(db_path.as_path()));
        assert!(db_path.exists());
    }

    #[test]
    fn test_file_database_pragmas() {
        let tmp = tempdir().unwrap();
        let db = Database::open(tmp.path().join("serials.db")).unwrap();
        let conn = db.connection();

        let journal_mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        let synchronous: i64 = conn
            .query_row("PRAGMA synchronous", [], |row| row.get(0))
            .unwrap();
        let foreign_keys: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();

        assert_eq!(journal_mode.to_lowercase(), "wal");
        // NORMAL
        assert_eq!(synchronous, 1);
        assert_eq!(foreign_keys, 1);
    }
}
