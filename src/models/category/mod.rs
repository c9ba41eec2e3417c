//! Category model for grouping birthdays.
//!
//! Every birthday belongs to exactly one of a fixed set of relationship
//! categories. The lowercase name is what gets stored and typed on the
//! command line; the icon and label are for display.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::birthday::ValidationError;

/// Relationship category of a birthday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Family,
    Friend,
    Colleague,
    #[default]
    Other,
}

impl Category {
    /// All categories in display order.
    pub fn all() -> [Category; 4] {
        [
            Category::Family,
            Category::Friend,
            Category::Colleague,
            Category::Other,
        ]
    }

    /// Stored/serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Family => "family",
            Category::Friend => "friend",
            Category::Colleague => "colleague",
            Category::Other => "other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Family => "👨‍👩‍👧‍👦",
            Category::Friend => "👥",
            Category::Colleague => "💼",
            Category::Other => "🎂",
        }
    }

    /// Plural label used in list headings and filters.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Family => "Family",
            Category::Friend => "Friends",
            Category::Colleague => "Colleagues",
            Category::Other => "Other",
        }
    }

    /// Get the display string (icon + label).
    pub fn display_name(&self) -> String {
        format!("{} {}", self.icon(), self.label())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "family" => Ok(Category::Family),
            "friend" | "friends" => Ok(Category::Friend),
            "colleague" | "colleagues" => Ok(Category::Colleague),
            "other" => Ok(Category::Other),
            _ => Err(ValidationError::UnknownCategory(s.to_string())),
        }
    }
}
