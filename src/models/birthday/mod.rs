//! Birthday records and the payloads used to create and edit them.
//!
//! Identity (`id`, `user_id`) and timestamps belong to whichever store holds
//! the record; everything else is entered by the user.

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::models::category::Category;
use crate::utils::date::parse_birth_date;

/// Reminder lead time used when none is given.
pub const DEFAULT_REMINDER_DAYS: u32 = 1;

/// Largest accepted reminder lead time.
pub const MAX_REMINDER_DAYS: u32 = 365;

/// Opaque identifier of a stored birthday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BirthdayId(pub i64);

impl fmt::Display for BirthdayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of the account owning a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors raised when birthday input cannot be accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Birth date '{0}' is not in YYYY-MM-DD format")]
    MalformedDate(String),
    #[error("Birth date '{0}' is not a valid calendar date")]
    InvalidCalendarDate(String),
    #[error("Name is required")]
    EmptyName,
    #[error("Reminder days must be between 0 and 365 (got {0})")]
    ReminderDaysOutOfRange(u32),
    #[error("Unknown category '{0}' (expected family, friend, colleague or other)")]
    UnknownCategory(String),
}

/// A stored birthday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Birthday {
    pub id: Option<BirthdayId>,
    pub user_id: Option<UserId>,
    pub name: String,
    /// `YYYY-MM-DD`; the year may be a placeholder when the real one is unknown.
    pub date: String,
    pub description: Option<String>,
    pub reminder_days: u32,
    pub is_recurring: bool,
    pub category: Category,
    pub created_at: Option<DateTime<Local>>,
    pub updated_at: Option<DateTime<Local>>,
}

impl Birthday {
    /// Create an unsaved birthday with default reminder settings.
    ///
    /// # Examples
    /// ```
    /// use birthday_reminder::models::birthday::Birthday;
    ///
    /// let birthday = Birthday::new("Ada", "1815-12-10").unwrap();
    /// assert_eq!(birthday.reminder_days, 1);
    /// assert!(birthday.is_recurring);
    /// ```
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Result<Self, ValidationError> {
        let birthday = Self {
            id: None,
            user_id: None,
            name: name.into(),
            date: date.into(),
            description: None,
            reminder_days: DEFAULT_REMINDER_DAYS,
            is_recurring: true,
            category: Category::default(),
            created_at: None,
            updated_at: None,
        };
        birthday.validate()?;
        Ok(Self {
            date: canonical_date(&birthday.date),
            ..birthday
        })
    }

    /// Validate the user-entered fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.name, &self.date, self.reminder_days)
    }

    /// Apply the `Some` fields of an update in place.
    pub fn apply(&mut self, update: &BirthdayUpdate) {
        if let Some(ref name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(ref date) = update.date {
            self.date = canonical_date(date);
        }
        if let Some(ref description) = update.description {
            self.description = normalize_description(Some(description.clone()));
        }
        if let Some(days) = update.reminder_days {
            self.reminder_days = days;
        }
        if let Some(recurring) = update.is_recurring {
            self.is_recurring = recurring;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
    }

    /// Case-insensitive match on name or description.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&term)
            || self
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&term))
    }
}

/// Payload for creating a birthday. Missing options take their defaults
/// when the store materialises the record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewBirthday {
    pub name: String,
    pub date: String,
    pub description: Option<String>,
    pub reminder_days: Option<u32>,
    pub is_recurring: Option<bool>,
    pub category: Option<Category>,
}

impl NewBirthday {
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn reminder_days(mut self, days: u32) -> Self {
        self.reminder_days = Some(days);
        self
    }

    pub fn recurring(mut self, recurring: bool) -> Self {
        self.is_recurring = Some(recurring);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(
            &self.name,
            &self.date,
            self.reminder_days.unwrap_or(DEFAULT_REMINDER_DAYS),
        )
    }

    /// Build the record a store will persist for `user`, filling in defaults.
    pub fn into_birthday(self, user: UserId) -> Result<Birthday, ValidationError> {
        self.validate()?;
        Ok(Birthday {
            id: None,
            user_id: Some(user),
            name: self.name.trim().to_string(),
            date: canonical_date(&self.date),
            description: normalize_description(self.description),
            reminder_days: self.reminder_days.unwrap_or(DEFAULT_REMINDER_DAYS),
            is_recurring: self.is_recurring.unwrap_or(true),
            category: self.category.unwrap_or_default(),
            created_at: None,
            updated_at: None,
        })
    }
}

/// Partial update; only `Some` fields change.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BirthdayUpdate {
    pub name: Option<String>,
    pub date: Option<String>,
    /// An empty string clears the description.
    pub description: Option<String>,
    pub reminder_days: Option<u32>,
    pub is_recurring: Option<bool>,
    pub category: Option<Category>,
}

impl BirthdayUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn validate_fields(name: &str, date: &str, reminder_days: u32) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    parse_birth_date(date)?;
    if reminder_days > MAX_REMINDER_DAYS {
        return Err(ValidationError::ReminderDaysOutOfRange(reminder_days));
    }
    Ok(())
}

/// Zero-padded `YYYY-MM-DD` so stored dates sort correctly as text.
/// Unparseable input is kept (trimmed) for validation to reject.
fn canonical_date(date: &str) -> String {
    parse_birth_date(date)
        .map(|parsed| parsed.to_string())
        .unwrap_or_else(|_| date.trim().to_string())
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}
