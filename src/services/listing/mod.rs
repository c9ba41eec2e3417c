//! Search, category and sort options for birthday lists.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::models::birthday::Birthday;
use crate::models::category::Category;
use crate::models::occurrence::BirthdayOccurrence;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// By date: stored date for records, days until for occurrences.
    #[default]
    Date,
    Name,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(SortOrder::Date),
            "name" => Ok(SortOrder::Name),
            other => Err(format!("Unknown sort order '{}' (expected date or name)", other)),
        }
    }
}

/// Anything a list view can show.
pub trait ListEntry {
    fn birthday(&self) -> &Birthday;
    fn date_cmp(&self, other: &Self) -> Ordering;
}

impl ListEntry for Birthday {
    fn birthday(&self) -> &Birthday {
        self
    }

    fn date_cmp(&self, other: &Self) -> Ordering {
        self.date.cmp(&other.date)
    }
}

impl ListEntry for BirthdayOccurrence {
    fn birthday(&self) -> &Birthday {
        &self.birthday
    }

    fn date_cmp(&self, other: &Self) -> Ordering {
        self.days_until.cmp(&other.days_until)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BirthdayFilter {
    /// Case-insensitive match on name or description.
    pub search: Option<String>,
    /// `None` shows all categories.
    pub category: Option<Category>,
    pub sort: SortOrder,
}

impl BirthdayFilter {
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = if term.trim().is_empty() { None } else { Some(term) };
        self
    }

    pub fn category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn matches(&self, birthday: &Birthday) -> bool {
        if let Some(category) = self.category {
            if birthday.category != category {
                return false;
            }
        }
        match self.search {
            Some(ref term) => birthday.matches(term),
            None => true,
        }
    }

    /// Keep matching entries and sort them. Name ties fall back to date.
    pub fn apply<T: ListEntry>(&self, entries: Vec<T>) -> Vec<T> {
        let mut kept: Vec<T> = entries
            .into_iter()
            .filter(|e| self.matches(e.birthday()))
            .collect();

        match self.sort {
            SortOrder::Date => kept.sort_by(|a, b| {
                a.date_cmp(b)
                    .then_with(|| a.birthday().name.cmp(&b.birthday().name))
            }),
            SortOrder::Name => kept.sort_by(|a, b| {
                let a_name = a.birthday().name.to_lowercase();
                let b_name = b.birthday().name.to_lowercase();
                a_name.cmp(&b_name).then_with(|| a.date_cmp(b))
            }),
        }
        kept
    }
}
