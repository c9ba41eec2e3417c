//! The next anniversary of a birthday, derived on demand and never stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::birthday::Birthday;

/// Where a Feb 29 birthday lands in a year without Feb 29.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeapDayPolicy {
    /// Celebrate on the last day of February.
    #[default]
    Feb28,
    /// Celebrate on the day after February.
    Mar1,
}

impl LeapDayPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeapDayPolicy::Feb28 => "feb28",
            LeapDayPolicy::Mar1 => "mar1",
        }
    }
}

/// A birthday enriched with its next anniversary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthdayOccurrence {
    pub birthday: Birthday,
    /// Date of the next anniversary (today or later).
    pub anniversary: NaiveDate,
    /// Calendar days from today to `anniversary`, never negative.
    pub days_until: i64,
    pub is_today: bool,
    /// Age reached on `anniversary`, when the stored year is a real birth year.
    pub age: Option<i32>,
}

impl BirthdayOccurrence {
    /// Card text in the style "3 days to go (Will turn 34)".
    pub fn countdown_text(&self) -> String {
        if self.is_today {
            match self.age {
                Some(age) => format!("Today is the day! (Turning {})", age),
                None => "Today is the day!".to_string(),
            }
        } else {
            let days = if self.days_until == 1 {
                "1 day to go".to_string()
            } else {
                format!("{} days to go", self.days_until)
            };
            match self.age {
                Some(age) => format!("{} (Will turn {})", days, age),
                None => days,
            }
        }
    }

    /// Whether a reminder for this birthday is due.
    pub fn reminder_due(&self) -> bool {
        self.days_until <= i64::from(self.birthday.reminder_days)
    }
}

impl AsRef<Birthday> for BirthdayOccurrence {
    fn as_ref(&self) -> &Birthday {
        &self.birthday
    }
}
