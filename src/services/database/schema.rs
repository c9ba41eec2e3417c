use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_birthdays_table(conn)?;
    run_birthday_migrations(conn)?;
    create_indexes(conn)?;
    Ok(())
}

fn create_birthdays_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS birthdays (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            date TEXT NOT NULL,
            description TEXT,
            reminder_days INTEGER NOT NULL DEFAULT 1,
            is_recurring INTEGER NOT NULL DEFAULT 1,
            category TEXT NOT NULL DEFAULT 'other',
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create birthdays table")?;

    Ok(())
}

/// Files written before reminders and categories existed only carry
/// name/date/description.
fn run_birthday_migrations(conn: &Connection) -> Result<()> {
    migrations::ensure_column(
        conn,
        "birthdays",
        "reminder_days",
        "ALTER TABLE birthdays ADD COLUMN reminder_days INTEGER NOT NULL DEFAULT 1",
    )?;

    migrations::ensure_column(
        conn,
        "birthdays",
        "is_recurring",
        "ALTER TABLE birthdays ADD COLUMN is_recurring INTEGER NOT NULL DEFAULT 1",
    )?;

    migrations::ensure_column(
        conn,
        "birthdays",
        "category",
        "ALTER TABLE birthdays ADD COLUMN category TEXT NOT NULL DEFAULT 'other'",
    )?;

    Ok(())
}

fn create_indexes(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_birthdays_user_date ON birthdays (user_id, date)",
        [],
    )
    .context("Failed to create birthdays index")?;

    Ok(())
}
