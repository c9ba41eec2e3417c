use anyhow::{anyhow, Context, Result};
use chrono::Local;
use rusqlite::{params, Connection};

use super::mapper::{row_to_birthday, BIRTHDAY_COLUMNS};
use super::BirthdayStore;
use crate::models::birthday::{Birthday, BirthdayId, BirthdayUpdate, NewBirthday, UserId};
use crate::models::category::Category;

/// Birthday store backed by the application's SQLite database.
pub struct SqliteBirthdayStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteBirthdayStore<'a> {
    /// Create a store over a connection whose schema is already initialized.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn query(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Birthday>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, row_to_birthday)?;
        rows.collect::<Result<Vec<_>, _>>()
            .context("Failed to fetch birthdays")
    }

    /// Number of records owned by `user`.
    pub fn count(&self, user: &UserId) -> Result<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM birthdays WHERE user_id = ?1",
            params![user.as_str()],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

impl<'a> BirthdayStore for SqliteBirthdayStore<'a> {
    fn list(&self, user: &UserId) -> Result<Vec<Birthday>> {
        self.query(
            &format!(
                "SELECT {BIRTHDAY_COLUMNS} FROM birthdays
                 WHERE user_id = ?1
                 ORDER BY date ASC, id ASC"
            ),
            params![user.as_str()],
        )
    }

    fn get(&self, id: BirthdayId) -> Result<Option<Birthday>> {
        let result = self.conn.query_row(
            &format!("SELECT {BIRTHDAY_COLUMNS} FROM birthdays WHERE id = ?1"),
            params![id.0],
            row_to_birthday,
        );

        match result {
            Ok(birthday) => Ok(Some(birthday)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn create(&self, user: &UserId, birthday: NewBirthday) -> Result<Birthday> {
        let mut record = birthday.into_birthday(user.clone())?;
        let now = Local::now();

        self.conn
            .execute(
                "INSERT INTO birthdays (
                    user_id, name, date, description, reminder_days,
                    is_recurring, category, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    user.as_str(),
                    record.name,
                    record.date,
                    record.description,
                    record.reminder_days,
                    record.is_recurring as i32,
                    record.category.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339(),
                ],
            )
            .context("Failed to insert birthday")?;

        let id = self.conn.last_insert_rowid();
        log::debug!("Created birthday {} for {}", id, user);

        record.id = Some(BirthdayId(id));
        record.created_at = Some(now);
        record.updated_at = Some(now);
        Ok(record)
    }

    fn update(&self, id: BirthdayId, update: &BirthdayUpdate) -> Result<Birthday> {
        let mut record = self
            .get(id)?
            .ok_or_else(|| anyhow!("Birthday with id {} not found", id))?;
        record.apply(update);
        record.validate()?;

        let now = Local::now();
        self.conn
            .execute(
                "UPDATE birthdays SET
                    name = ?1, date = ?2, description = ?3, reminder_days = ?4,
                    is_recurring = ?5, category = ?6, updated_at = ?7
                 WHERE id = ?8",
                params![
                    record.name,
                    record.date,
                    record.description,
                    record.reminder_days,
                    record.is_recurring as i32,
                    record.category.as_str(),
                    now.to_rfc3339(),
                    id.0,
                ],
            )
            .context("Failed to update birthday")?;

        record.updated_at = Some(now);
        Ok(record)
    }

    fn delete(&self, id: BirthdayId) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM birthdays WHERE id = ?1", params![id.0])
            .context("Failed to delete birthday")?;

        if rows_affected == 0 {
            return Err(anyhow!("Birthday with id {} not found", id));
        }

        Ok(())
    }

    fn list_by_category(&self, user: &UserId, category: Category) -> Result<Vec<Birthday>> {
        self.query(
            &format!(
                "SELECT {BIRTHDAY_COLUMNS} FROM birthdays
                 WHERE user_id = ?1 AND category = ?2
                 ORDER BY date ASC, id ASC"
            ),
            params![user.as_str(), category.as_str()],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::database::Database;
    use crate::services::store::MemoryBirthdayStore;
    use pretty_assertions::assert_eq;

    fn setup_test_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn alice() -> UserId {
        UserId::new("alice")
    }

    #[test]
    fn test_create_and_get() {
        let db = setup_test_db();
        let store = SqliteBirthdayStore::new(db.connection());

        let created = store
            .create(
                &alice(),
                NewBirthday::new("Ada", "1815-12-10")
                    .description("Mathematician")
                    .reminder_days(3)
                    .category(Category::Friend),
            )
            .unwrap();
        assert!(created.id.is_some());

        let fetched = store.get(created.id.unwrap()).unwrap().unwrap();
        assert_eq!(fetched.name, "Ada");
        assert_eq!(fetched.date, "1815-12-10");
        assert_eq!(fetched.description.as_deref(), Some("Mathematician"));
        assert_eq!(fetched.reminder_days, 3);
        assert!(fetched.is_recurring);
        assert_eq!(fetched.category, Category::Friend);
        assert_eq!(fetched.user_id, Some(alice()));
        assert!(fetched.created_at.is_some());
    }

    #[test]
    fn test_get_nonexistent() {
        let db = setup_test_db();
        let store = SqliteBirthdayStore::new(db.connection());
        assert!(store.get(BirthdayId(999)).unwrap().is_none());
    }

    #[test]
    fn test_create_invalid_is_not_inserted() {
        let db = setup_test_db();
        let store = SqliteBirthdayStore::new(db.connection());

        assert!(store.create(&alice(), NewBirthday::new("", "1990-01-01")).is_err());
        assert_eq!(store.count(&alice()).unwrap(), 0);
    }

    #[test]
    fn test_list_scoped_and_ordered_by_date() {
        let db = setup_test_db();
        let store = SqliteBirthdayStore::new(db.connection());

        store.create(&alice(), NewBirthday::new("B", "1992-02-02")).unwrap();
        store.create(&alice(), NewBirthday::new("A", "1980-12-12")).unwrap();
        store
            .create(&UserId::new("bob"), NewBirthday::new("C", "1970-01-01"))
            .unwrap();

        let names: Vec<String> = store
            .list(&alice())
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_unpadded_dates_are_stored_canonically_and_sorted() {
        let db = setup_test_db();
        let store = SqliteBirthdayStore::new(db.connection());

        store.create(&alice(), NewBirthday::new("June", "1990-6-5")).unwrap();
        store.create(&alice(), NewBirthday::new("October", "1990-10-01")).unwrap();

        let order: Vec<(String, String)> = store
            .list(&alice())
            .unwrap()
            .into_iter()
            .map(|b| (b.name, b.date))
            .collect();
        assert_eq!(
            order,
            vec![
                ("June".to_string(), "1990-06-05".to_string()),
                ("October".to_string(), "1990-10-01".to_string()),
            ]
        );

        let october = store.list(&alice()).unwrap().remove(1);
        let update = BirthdayUpdate {
            date: Some("1990-1-2".to_string()),
            ..BirthdayUpdate::default()
        };
        store.update(october.id.unwrap(), &update).unwrap();
        assert_eq!(store.list(&alice()).unwrap()[0].date, "1990-01-02");
    }

    #[test]
    fn test_update() {
        let db = setup_test_db();
        let store = SqliteBirthdayStore::new(db.connection());

        let created = store.create(&alice(), NewBirthday::new("Ada", "1815-12-10")).unwrap();
        let id = created.id.unwrap();

        let update = BirthdayUpdate {
            name: Some("Ada Lovelace".to_string()),
            is_recurring: Some(false),
            ..BirthdayUpdate::default()
        };
        let updated = store.update(id, &update).unwrap();
        assert_eq!(updated.name, "Ada Lovelace");
        assert!(!updated.is_recurring);

        let fetched = store.get(id).unwrap().unwrap();
        assert_eq!(fetched.name, "Ada Lovelace");
        assert!(!fetched.is_recurring);
        assert_eq!(fetched.date, "1815-12-10");
    }

    #[test]
    fn test_update_nonexistent() {
        let db = setup_test_db();
        let store = SqliteBirthdayStore::new(db.connection());

        let result = store.update(BirthdayId(999), &BirthdayUpdate::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_update_rejects_invalid_date() {
        let db = setup_test_db();
        let store = SqliteBirthdayStore::new(db.connection());

        let created = store.create(&alice(), NewBirthday::new("Ada", "1815-12-10")).unwrap();
        let update = BirthdayUpdate {
            date: Some("1815-13-01".to_string()),
            ..BirthdayUpdate::default()
        };
        assert!(store.update(created.id.unwrap(), &update).is_err());
        assert_eq!(
            store.get(created.id.unwrap()).unwrap().unwrap().date,
            "1815-12-10"
        );
    }

    #[test]
    fn test_delete() {
        let db = setup_test_db();
        let store = SqliteBirthdayStore::new(db.connection());

        let created = store.create(&alice(), NewBirthday::new("Ada", "1815-12-10")).unwrap();
        let id = created.id.unwrap();

        store.delete(id).unwrap();
        assert!(store.get(id).unwrap().is_none());
        assert!(store.delete(id).is_err(), "Deleting twice should fail");
    }

    #[test]
    fn test_search_matches_name_and_description() {
        let db = setup_test_db();
        let store = SqliteBirthdayStore::new(db.connection());

        store.create(&alice(), NewBirthday::new("Grace Hopper", "1906-12-09")).unwrap();
        store
            .create(
                &alice(),
                NewBirthday::new("Mum", "1960-05-05").description("Bring flowers"),
            )
            .unwrap();
        store
            .create(&UserId::new("bob"), NewBirthday::new("Grace Kelly", "1929-11-12"))
            .unwrap();

        let found = store.search(&alice(), "grace").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Grace Hopper");

        let found = store.search(&alice(), "FLOWERS").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Mum");

        assert!(store.search(&alice(), "100%").unwrap().is_empty());
    }

    #[test]
    fn test_search_ignores_case_beyond_ascii() {
        let db = setup_test_db();
        let store = SqliteBirthdayStore::new(db.connection());

        store.create(&alice(), NewBirthday::new("Élodie", "1993-04-18")).unwrap();

        let found = store.search(&alice(), "élodie").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Élodie");

        let memory = MemoryBirthdayStore::new();
        memory.create(&alice(), NewBirthday::new("Élodie", "1993-04-18")).unwrap();
        let names = |found: Vec<Birthday>| -> Vec<String> {
            found.into_iter().map(|b| b.name).collect()
        };
        for term in ["ÉLODIE", "lodie", "Élo"] {
            assert_eq!(
                names(store.search(&alice(), term).unwrap()),
                names(memory.search(&alice(), term).unwrap()),
                "stores disagree on {term}"
            );
        }
    }

    #[test]
    fn test_list_by_category() {
        let db = setup_test_db();
        let store = SqliteBirthdayStore::new(db.connection());

        store
            .create(&alice(), NewBirthday::new("Mum", "1960-05-05").category(Category::Family))
            .unwrap();
        store
            .create(&alice(), NewBirthday::new("Sam", "1990-01-01").category(Category::Friend))
            .unwrap();
        store.create(&alice(), NewBirthday::new("Kim", "1991-01-01")).unwrap();

        let family = store.list_by_category(&alice(), Category::Family).unwrap();
        assert_eq!(family.len(), 1);
        assert_eq!(family[0].name, "Mum");

        let other = store.list_by_category(&alice(), Category::Other).unwrap();
        assert_eq!(other.len(), 1);
        assert_eq!(other[0].name, "Kim");
    }

    #[test]
    fn test_reads_rows_with_sqlite_default_timestamps() {
        let db = setup_test_db();
        db.connection()
            .execute(
                "INSERT INTO birthdays (user_id, name, date) VALUES ('alice', 'Legacy', '1970-07-07')",
                [],
            )
            .unwrap();

        let store = SqliteBirthdayStore::new(db.connection());
        let records = store.list(&alice()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].reminder_days, 1);
        assert_eq!(records[0].category, Category::Other);
        assert!(records[0].created_at.is_some());
    }
}
