// Date utility functions
// Birth-date parsing and calendar helpers shared by the services

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::models::birthday::ValidationError;

/// Years at or below this are treated as placeholders, not real birth years.
pub const PLACEHOLDER_YEAR_MAX: i32 = 1900;

/// Calendar fields of a stored birth date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl BirthDate {
    pub fn is_leap_day(&self) -> bool {
        self.month == 2 && self.day == 29
    }

    /// Whether the year looks like a real birth year relative to `today`.
    pub fn has_plausible_year(&self, today: NaiveDate) -> bool {
        self.year > PLACEHOLDER_YEAR_MAX && self.year <= today.year()
    }
}

/// Canonical zero-padded `YYYY-MM-DD`.
impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Parse a stored `YYYY-MM-DD` date.
///
/// A trailing time portion (`T...` or ` ...`) is ignored so values written
/// by document stores as full timestamps still resolve to their calendar
/// date. Feb 29 is accepted for any year because the year may be a
/// placeholder.
pub fn parse_birth_date(input: &str) -> Result<BirthDate, ValidationError> {
    let trimmed = input.trim();
    let date_part = trimmed
        .split_once(|c: char| c == 'T' || c == ' ')
        .map_or(trimmed, |(date, _time)| date);

    let malformed = || ValidationError::MalformedDate(input.to_string());

    let mut parts = date_part.split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed());
    };

    if !is_digits(year, 4, 4) || !is_digits(month, 1, 2) || !is_digits(day, 1, 2) {
        return Err(malformed());
    }

    let year: i32 = year.parse().map_err(|_| malformed())?;
    let month: u32 = month.parse().map_err(|_| malformed())?;
    let day: u32 = day.parse().map_err(|_| malformed())?;

    // 2000 is a leap year, so Feb 29 passes here regardless of `year`.
    if day == 0 || day > days_in_month(2000, month) {
        return Err(ValidationError::InvalidCalendarDate(input.to_string()));
    }

    Ok(BirthDate { year, month, day })
}

fn is_digits(s: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}

pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Number of days in `month` of `year` (0 for an invalid month).
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// "June 15, 1990", or "June 15" when the year is a placeholder.
pub fn format_birth_date(date: &BirthDate) -> String {
    let month = month_name(date.month);
    if date.year > PLACEHOLDER_YEAR_MAX {
        format!("{} {}, {}", month, date.day, date.year)
    } else {
        format!("{} {}", month, date.day)
    }
}

/// "Dec 10"
pub fn format_short(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "?",
    }
}
