//! SQLite connection and schema management for the birthday store.

mod connection;
pub mod migrations;
mod schema;

pub use connection::Database;
