use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

use super::schema;

/// An open birthday database with its schema in place.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the birthday file at `path`, creating it when missing, and bring
    /// its schema up to date.
    ///
    /// ```
    /// use birthday_reminder::services::database::Database;
    /// let db = Database::open_in_memory().unwrap();
    /// assert!(db.connection().is_autocommit());
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open birthday database {}", path.display()))?;
        log::debug!("Opened birthday database {}", path.display());
        Self::prepare(conn)
    }

    /// A throwaway database that lives as long as the value does.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::prepare(conn)
    }

    fn prepare(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", true)
            .context("Failed to enable foreign keys")?;
        schema::initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
