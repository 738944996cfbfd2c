//! Serial number entry model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A unique identifier for an entry, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Create a new unique entry ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// One serial number in the list
///
/// Entries are never edited after creation; removing and re-adding is the
/// only way to change a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Store-assigned identity
    pub id: EntryId,
    /// The serial number text, exactly as entered
    pub value: String,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
}

impl Entry {
    /// Create a new entry with a fresh id
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            value: value.into(),
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Exact, case-sensitive comparison against a candidate value
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        self.value == value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_id_unique() {
        let id1 = EntryId::new();
        let id2 = EntryId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_entry_id_parse() {
        let id = EntryId::new();
        let parsed: EntryId = id.as_str().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_entry_new() {
        let entry = Entry::new("SN-0001");
        assert_eq!(entry.value, "SN-0001");
        assert!(entry.created_at > 0);
    }

    #[test]
    fn test_matches_is_exact() {
        let entry = Entry::new("ab12");
        assert!(entry.matches("ab12"));
        assert!(!entry.matches("AB12"));
        assert!(!entry.matches(" ab12"));
        assert!(!entry.matches("ab12 "));
    }
}
