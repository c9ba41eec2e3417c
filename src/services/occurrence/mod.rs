//! Next-anniversary calculation for stored birthdays.
//!
//! Everything here works on calendar dates (`NaiveDate`): an instant is
//! reduced to its date before any arithmetic, so the time of day of either
//! input can never turn a same-day birthday into "1 day to go".

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};

use crate::models::birthday::{Birthday, ValidationError};
use crate::models::occurrence::{BirthdayOccurrence, LeapDayPolicy};
use crate::utils::date::{parse_birth_date, BirthDate};

/// Computes days-until, today flag and age for birthdays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OccurrenceCalculator {
    leap_day_policy: LeapDayPolicy,
}

impl OccurrenceCalculator {
    pub fn new(leap_day_policy: LeapDayPolicy) -> Self {
        Self { leap_day_policy }
    }

    pub fn leap_day_policy(&self) -> LeapDayPolicy {
        self.leap_day_policy
    }

    /// Compute the next occurrence of `record` on or after `today`.
    ///
    /// # Examples
    /// ```
    /// use birthday_reminder::models::birthday::Birthday;
    /// use birthday_reminder::services::occurrence::OccurrenceCalculator;
    /// use chrono::NaiveDate;
    ///
    /// let record = Birthday::new("Sam", "1990-01-01").unwrap();
    /// let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    /// let next = OccurrenceCalculator::default().compute(&record, today).unwrap();
    /// assert_eq!(next.days_until, 200);
    /// assert_eq!(next.age, Some(35));
    /// ```
    pub fn compute(
        &self,
        record: &Birthday,
        today: NaiveDate,
    ) -> Result<BirthdayOccurrence, ValidationError> {
        let birth = parse_birth_date(&record.date)?;

        let mut anniversary = self.anniversary_in(&birth, today.year(), &record.date)?;
        if anniversary < today {
            anniversary = self.anniversary_in(&birth, today.year() + 1, &record.date)?;
        }

        let days_until = (anniversary - today).num_days();
        let age = birth
            .has_plausible_year(today)
            .then(|| anniversary.year() - birth.year);

        Ok(BirthdayOccurrence {
            birthday: record.clone(),
            anniversary,
            days_until,
            is_today: days_until == 0,
            age,
        })
    }

    /// Same as [`compute`](Self::compute) for an instant in any timezone;
    /// only its local calendar date is used.
    pub fn compute_at<Tz: TimeZone>(
        &self,
        record: &Birthday,
        now: &DateTime<Tz>,
    ) -> Result<BirthdayOccurrence, ValidationError> {
        self.compute(record, now.date_naive())
    }

    /// Compute occurrences for many records, keeping input order.
    /// Records with unusable dates are returned separately.
    pub fn compute_all<'r>(
        &self,
        records: impl IntoIterator<Item = &'r Birthday>,
        today: NaiveDate,
    ) -> (Vec<BirthdayOccurrence>, Vec<(&'r Birthday, ValidationError)>) {
        let mut occurrences = Vec::new();
        let mut rejected = Vec::new();
        for record in records {
            match self.compute(record, today) {
                Ok(occurrence) => occurrences.push(occurrence),
                Err(err) => rejected.push((record, err)),
            }
        }
        (occurrences, rejected)
    }

    /// The month/day of `birth` placed in `year`.
    fn anniversary_in(
        &self,
        birth: &BirthDate,
        year: i32,
        raw: &str,
    ) -> Result<NaiveDate, ValidationError> {
        if let Some(date) = NaiveDate::from_ymd_opt(year, birth.month, birth.day) {
            return Ok(date);
        }
        if birth.is_leap_day() {
            let substitute = match self.leap_day_policy {
                LeapDayPolicy::Feb28 => NaiveDate::from_ymd_opt(year, 2, 28),
                LeapDayPolicy::Mar1 => NaiveDate::from_ymd_opt(year, 3, 1),
            };
            if let Some(date) = substitute {
                return Ok(date);
            }
        }
        Err(ValidationError::InvalidCalendarDate(raw.to_string()))
    }
}

/// Compute the next occurrence with the default leap-day policy.
pub fn compute_occurrence(
    record: &Birthday,
    today: NaiveDate,
) -> Result<BirthdayOccurrence, ValidationError> {
    OccurrenceCalculator::default().compute(record, today)
}
