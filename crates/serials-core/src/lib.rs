//! serials-core - Core library for Serials
//!
//! This crate contains the entry model, the entry stores, the list controller
//! and the CSV exporter shared by every Serials front end.

pub mod controller;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod store;

pub use controller::{Intent, Key, ListController, Notice, NoticeKind, Selection};
pub use error::{Error, Result};
pub use models::{Entry, EntryId};
pub use store::{EntryStore, MemoryEntryStore, SqliteEntryStore};
