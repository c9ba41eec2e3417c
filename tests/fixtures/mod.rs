// Test fixtures - reusable test data
// Provides consistent dates and birthdays across all test files

#![allow(dead_code)]

use chrono::NaiveDate;

use birthday_reminder::models::birthday::{NewBirthday, UserId};
use birthday_reminder::models::category::Category;

/// Sample "today" values
pub mod dates {
    use super::*;

    /// Mid-year reference day used by most scenarios
    pub fn mid_june_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    /// First day after February in a non-leap year
    pub fn march_1_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    /// Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }

    /// Dec 31, 2024 (year rollover)
    pub fn new_years_eve_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    }
}

/// Sample birthdays
pub mod birthdays {
    use super::*;

    pub fn alice() -> UserId {
        UserId::new("alice")
    }

    pub fn bob() -> UserId {
        UserId::new("bob")
    }

    /// A small address book spread across categories and the year
    pub fn address_book() -> Vec<NewBirthday> {
        vec![
            NewBirthday::new("Mum", "1960-06-15")
                .category(Category::Family)
                .reminder_days(7),
            NewBirthday::new("Sam", "1992-06-20").category(Category::Friend),
            NewBirthday::new("Grace", "1906-12-09")
                .category(Category::Colleague)
                .description("Compiler pioneer"),
            NewBirthday::new("Leap Baby", "2000-02-29"),
            // Placeholder year, age unknown
            NewBirthday::new("Neighbour", "1900-07-01").category(Category::Other),
        ]
    }
}
