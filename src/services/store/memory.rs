use std::cell::{Cell, RefCell};

use anyhow::{anyhow, Result};
use chrono::Local;

use super::{sort_by_stored_date, BirthdayStore};
use crate::models::birthday::{Birthday, BirthdayId, BirthdayUpdate, NewBirthday, UserId};

/// Non-persistent store kept in process memory.
#[derive(Debug)]
pub struct MemoryBirthdayStore {
    records: RefCell<Vec<Birthday>>,
    next_id: Cell<i64>,
}

impl Default for MemoryBirthdayStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBirthdayStore {
    pub fn new() -> Self {
        Self {
            records: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    /// Total number of records across all users.
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl BirthdayStore for MemoryBirthdayStore {
    fn list(&self, user: &UserId) -> Result<Vec<Birthday>> {
        let mut records: Vec<Birthday> = self
            .records
            .borrow()
            .iter()
            .filter(|b| b.user_id.as_ref() == Some(user))
            .cloned()
            .collect();
        sort_by_stored_date(&mut records);
        Ok(records)
    }

    fn get(&self, id: BirthdayId) -> Result<Option<Birthday>> {
        Ok(self
            .records
            .borrow()
            .iter()
            .find(|b| b.id == Some(id))
            .cloned())
    }

    fn create(&self, user: &UserId, birthday: NewBirthday) -> Result<Birthday> {
        let mut record = birthday.into_birthday(user.clone())?;

        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let now = Local::now();
        record.id = Some(BirthdayId(id));
        record.created_at = Some(now);
        record.updated_at = Some(now);

        log::debug!("Created birthday {} for {}", id, user);
        self.records.borrow_mut().push(record.clone());
        Ok(record)
    }

    fn update(&self, id: BirthdayId, update: &BirthdayUpdate) -> Result<Birthday> {
        let mut records = self.records.borrow_mut();
        let record = records
            .iter_mut()
            .find(|b| b.id == Some(id))
            .ok_or_else(|| anyhow!("Birthday with id {} not found", id))?;

        let mut updated = record.clone();
        updated.apply(update);
        updated.validate()?;
        updated.updated_at = Some(Local::now());

        *record = updated.clone();
        Ok(updated)
    }

    fn delete(&self, id: BirthdayId) -> Result<()> {
        let mut records = self.records.borrow_mut();
        let before = records.len();
        records.retain(|b| b.id != Some(id));
        if records.len() == before {
            return Err(anyhow!("Birthday with id {} not found", id));
        }
        Ok(())
    }
}
