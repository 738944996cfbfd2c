//! Entry store abstraction
//!
//! Mutations are queued by `insert`/`delete` and only become durable when
//! `commit` succeeds. A commit applies every queued change or none of them;
//! a failed commit discards the queue.

mod memory;

pub use crate::db::SqliteEntryStore;
pub use memory::MemoryEntryStore;

use crate::error::Result;
use crate::models::{Entry, EntryId};

/// A change queued since the last commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingChange {
    Insert(Entry),
    Delete(EntryId),
}

/// Persistent collection of serial number entries
pub trait EntryStore {
    /// Queue a new entry and return it with its store-assigned id
    fn insert(&mut self, value: &str) -> Result<Entry>;

    /// Queue removal of an entry
    fn delete(&mut self, id: &EntryId) -> Result<()>;

    /// All committed entries in insertion order
    fn query_all(&self) -> Result<Vec<Entry>>;

    /// Durably apply every queued change
    fn commit(&mut self) -> Result<()>;

    /// Drop queued changes without applying them
    fn discard_pending(&mut self);

    /// Whether changes are waiting for a commit
    fn has_pending_changes(&self) -> bool;
}
