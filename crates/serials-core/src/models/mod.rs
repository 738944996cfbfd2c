//! Data models for Serials

mod entry;

pub use entry::{Entry, EntryId};
