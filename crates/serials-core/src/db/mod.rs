//! Database layer for Serials

mod connection;
mod migrations;
mod repository;

pub use connection::Database;
pub use repository::SqliteEntryStore;
