use super::{EntryStore, PendingChange};
use crate::error::{Error, Result};
use crate::models::{Entry, EntryId};

/// In-memory entry store for testing.
///
/// Behaves like the `SQLite` store (atomic commits, unique non-empty values)
/// and can be told to fail commits or reads to exercise error handling.
#[derive(Debug, Default)]
pub struct MemoryEntryStore {
    entries: Vec<Entry>,
    pending: Vec<PendingChange>,
    simulate_commit_error: bool,
    simulate_query_error: bool,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store that already holds the given values, committed.
    pub fn with_values<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut store = Self::new();
        for value in values {
            store.insert(value.as_ref())?;
        }
        store.commit()?;
        Ok(store)
    }

    /// Enable commit error simulation for testing error handling.
    pub fn set_simulate_commit_error(&mut self, simulate: bool) {
        self.simulate_commit_error = simulate;
    }

    /// Make `query_all` fail while still accepting commits.
    pub fn set_simulate_query_error(&mut self, simulate: bool) {
        self.simulate_query_error = simulate;
    }

    fn apply(entries: &mut Vec<Entry>, change: PendingChange) -> Result<()> {
        match change {
            PendingChange::Insert(entry) => {
                if entry.value.is_empty() {
                    return Err(Error::InvalidInput("empty serial number".into()));
                }
                if entries.iter().any(|existing| existing.matches(&entry.value)) {
                    return Err(Error::DuplicateEntry(entry.value));
                }
                entries.push(entry);
            }
            PendingChange::Delete(id) => {
                let position = entries
                    .iter()
                    .position(|entry| entry.id == id)
                    .ok_or_else(|| Error::NotFound(id.to_string()))?;
                entries.remove(position);
            }
        }
        Ok(())
    }
}

impl EntryStore for MemoryEntryStore {
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
        if self.simulate_query_error {
            return Err(Error::Persistence("Simulated query error".to_string()));
        }
        Ok(self.entries.clone())
    }

    fn commit(&mut self) -> Result<()> {
        let pending = std::mem::take(&mut self.pending);
        if self.simulate_commit_error {
            return Err(Error::Persistence("Simulated commit error".to_string()));
        }

        let mut staged = self.entries.clone();
        for change in pending {
            Self::apply(&mut staged, change)?;
        }
        self.entries = staged;
        Ok(())
    }

    fn discard_pending(&mut self) {
        self.pending.clear();
    }

    fn has_pending_changes(&self) -> bool {
        !self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_invisible_until_commit() {
        let mut store = MemoryEntryStore::new();
        store.insert("A1").unwrap();

        assert!(store.query_all().unwrap().is_empty());
        assert!(store.has_pending_changes());

        store.commit().unwrap();
        let values: Vec<String> = store.query_all().unwrap().into_iter().map(|e| e.value).collect();
        assert_eq!(values, vec!["A1"]);
        assert!(!store.has_pending_changes());
    }

    #[test]
    fn failed_commit_applies_nothing() {
        let mut store = MemoryEntryStore::with_values(["A1"]).unwrap();
        let existing = store.query_all().unwrap();

        store.insert("B2").unwrap();
        store.insert("A1").unwrap();
        assert!(matches!(store.commit(), Err(Error::DuplicateEntry(_))));

        assert_eq!(store.query_all().unwrap(), existing);
        assert!(!store.has_pending_changes());
    }

    #[test]
    fn simulated_commit_error_discards_queue() {
        let mut store = MemoryEntryStore::new();
        store.set_simulate_commit_error(true);
        store.insert("A1").unwrap();

        assert!(matches!(store.commit(), Err(Error::Persistence(_))));
        assert!(store.query_all().unwrap().is_empty());
        assert!(!store.has_pending_changes());
    }

    #[test]
    fn simulated_query_error_still_commits() {
        let mut store = MemoryEntryStore::new();
        store.set_simulate_query_error(true);
        store.insert("A1").unwrap();
        store.commit().unwrap();

        assert!(matches!(store.query_all(), Err(Error::Persistence(_))));
        store.set_simulate_query_error(false);
        assert_eq!(store.query_all().unwrap().len(), 1);
    }

    #[test]
    fn delete_unknown_id_fails_commit() {
        let mut store = MemoryEntryStore::with_values(["A1"]).unwrap();
        store.delete(&EntryId::new()).unwrap();

        assert!(matches!(store.commit(), Err(Error::NotFound(_))));
        assert_eq!(store.query_all().unwrap().len(), 1);
    }

    #[test]
    fn preserves_insertion_order() {
        let store = MemoryEntryStore::with_values(["Z9", "A1", "M5"]).unwrap();
        let values: Vec<String> = store.query_all().unwrap().into_iter().map(|e| e.value).collect();
        assert_eq!(values, vec!["Z9", "A1", "M5"]);
    }
}
