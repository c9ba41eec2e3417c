use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use super::BirthdayService;
use crate::models::birthday::Birthday;
use crate::models::category::Category;
use crate::models::occurrence::BirthdayOccurrence;
use crate::services::auth::AuthProvider;
use crate::services::store::BirthdayStore;

/// Summary counts for the signed-in user's birthdays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthdayStats {
    pub total: usize,
    /// Birthdays within the service's upcoming window.
    pub upcoming: usize,
    pub today: usize,
    pub categories: BTreeMap<Category, usize>,
}

impl<A: AuthProvider, S: BirthdayStore> BirthdayService<A, S> {
    /// Next occurrence of every birthday, in stored order (not sorted by
    /// days). Records whose date no longer parses are logged and skipped.
    pub fn occurrences(&self, today: NaiveDate) -> Result<Vec<BirthdayOccurrence>> {
        let records = self.list()?;
        Ok(self.occurrences_of(&records, today))
    }

    /// Birthdays occurring within `within_days` of `today`, soonest first.
    pub fn upcoming(&self, within_days: u32, today: NaiveDate) -> Result<Vec<BirthdayOccurrence>> {
        let mut upcoming: Vec<BirthdayOccurrence> = self
            .occurrences(today)?
            .into_iter()
            .filter(|o| o.days_until <= i64::from(within_days))
            .collect();
        sort_by_days_until(&mut upcoming);
        Ok(upcoming)
    }

    /// [`upcoming`](Self::upcoming) with the configured window.
    pub fn upcoming_default(&self, today: NaiveDate) -> Result<Vec<BirthdayOccurrence>> {
        self.upcoming(self.upcoming_window_days, today)
    }

    /// Birthdays whose name or description contains `term`.
    pub fn search(&self, term: &str) -> Result<Vec<Birthday>> {
        match self.current_user() {
            Some(user) => self
                .store
                .search(&user, term)
                .context("Failed to search birthdays"),
            None => Ok(Vec::new()),
        }
    }

    pub fn by_category(&self, category: Category) -> Result<Vec<Birthday>> {
        match self.current_user() {
            Some(user) => self
                .store
                .list_by_category(&user, category)
                .context("Failed to load birthdays by category"),
            None => Ok(Vec::new()),
        }
    }

    /// Totals, upcoming/today counts and a per-category breakdown.
    pub fn stats(&self, today: NaiveDate) -> Result<BirthdayStats> {
        let records = self.list()?;
        let occurrences = self.occurrences_of(&records, today);

        let upcoming: Vec<&BirthdayOccurrence> = occurrences
            .iter()
            .filter(|o| o.days_until <= i64::from(self.upcoming_window_days))
            .collect();

        let mut categories = BTreeMap::new();
        for record in &records {
            *categories.entry(record.category).or_insert(0) += 1;
        }

        Ok(BirthdayStats {
            total: records.len(),
            upcoming: upcoming.len(),
            today: upcoming.iter().filter(|o| o.is_today).count(),
            categories,
        })
    }

    fn occurrences_of(&self, records: &[Birthday], today: NaiveDate) -> Vec<BirthdayOccurrence> {
        let (occurrences, rejected) = self.calculator.compute_all(records, today);
        for (record, err) in rejected {
            log::warn!(
                "Skipping birthday '{}' ({:?}): {}",
                record.name,
                record.id,
                err
            );
        }
        occurrences
    }
}

/// Soonest first; ties broken by name so output is stable.
pub fn sort_by_days_until(occurrences: &mut [BirthdayOccurrence]) {
    occurrences.sort_by(|a, b| {
        a.days_until
            .cmp(&b.days_until)
            .then_with(|| a.birthday.name.cmp(&b.birthday.name))
    });
}
