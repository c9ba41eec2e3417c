//! Storage collaborators for birthday records.
//!
//! [`BirthdayStore`] is the only thing the rest of the crate knows about
//! persistence. Two implementations ship: [`SqliteBirthdayStore`] for the
//! application and [`MemoryBirthdayStore`] for tests and throwaway sessions.

use anyhow::Result;

use crate::models::birthday::{Birthday, BirthdayId, BirthdayUpdate, NewBirthday, UserId};
use crate::models::category::Category;

mod mapper;
pub mod memory;
pub mod sqlite;

pub use memory::MemoryBirthdayStore;
pub use sqlite::SqliteBirthdayStore;

/// Persistence for birthday records. Stores assign ids and timestamps.
#[cfg_attr(test, mockall::automock)]
pub trait BirthdayStore {
    /// All records owned by `user`, ordered by stored date.
    fn list(&self, user: &UserId) -> Result<Vec<Birthday>>;

    fn get(&self, id: BirthdayId) -> Result<Option<Birthday>>;

    /// Validate, apply defaults and persist a new record for `user`.
    fn create(&self, user: &UserId, birthday: NewBirthday) -> Result<Birthday>;

    /// Apply a partial update and return the stored result.
    fn update(&self, id: BirthdayId, update: &BirthdayUpdate) -> Result<Birthday>;

    fn delete(&self, id: BirthdayId) -> Result<()>;

    /// Records whose name or description contains `term`, ignoring case
    /// (Unicode-aware). Stores share this filter so results agree.
    fn search(&self, user: &UserId, term: &str) -> Result<Vec<Birthday>> {
        Ok(self
            .list(user)?
            .into_iter()
            .filter(|b| b.matches(term))
            .collect())
    }

    fn list_by_category(&self, user: &UserId, category: Category) -> Result<Vec<Birthday>> {
        Ok(self
            .list(user)?
            .into_iter()
            .filter(|b| b.category == category)
            .collect())
    }
}

/// Ordering shared by the stores: stored date string, then id.
pub(crate) fn sort_by_stored_date(records: &mut [Birthday]) {
    records.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
}
