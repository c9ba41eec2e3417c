use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use rusqlite::types::Type;
use rusqlite::{self, Result, Row};

use crate::models::birthday::{Birthday, BirthdayId, UserId};
use crate::models::category::Category;

/// Columns selected by every birthday query, in the order `row_to_birthday` reads them.
pub(crate) const BIRTHDAY_COLUMNS: &str = "id, user_id, name, date, description, reminder_days, \
     is_recurring, category, created_at, updated_at";

pub(crate) fn row_to_birthday(row: &Row) -> Result<Birthday> {
    let category: String = row.get(7)?;
    let category = category
        .parse::<Category>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e)))?;

    Ok(Birthday {
        id: Some(BirthdayId(row.get(0)?)),
        user_id: Some(UserId(row.get(1)?)),
        name: row.get(2)?,
        date: row.get(3)?,
        description: row.get(4)?,
        reminder_days: row.get(5)?,
        is_recurring: row.get::<_, i32>(6)? != 0,
        category,
        created_at: Some(to_local_datetime(8, row.get(8)?)?),
        updated_at: Some(to_local_datetime(9, row.get(9)?)?),
    })
}

/// Accepts our RFC 3339 timestamps and SQLite's `CURRENT_TIMESTAMP` (UTC) format.
pub(crate) fn to_local_datetime(column: usize, value: String) -> Result<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(&value) {
        return Ok(dt.with_timezone(&Local));
    }
    NaiveDateTime::parse_from_str(&value, "%Y-%m-%d %H:%M:%S")
        .map(|naive| Utc.from_utc_datetime(&naive).with_timezone(&Local))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}
