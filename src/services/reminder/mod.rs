//! Turns due occurrences into notifications.

use crate::models::occurrence::BirthdayOccurrence;
use crate::services::notification::{NotificationUrgency, Notifier};

/// Outcome of one reminder pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReminderReport {
    pub sent: usize,
    pub failed: usize,
    /// Due reminders not sent because notifications are turned off.
    pub skipped: usize,
}

pub struct ReminderService<N> {
    notifier: N,
}

impl<N: Notifier> ReminderService<N> {
    pub fn new(notifier: N) -> Self {
        Self { notifier }
    }

    /// Occurrences whose reminder window has opened, soonest first.
    pub fn due<'a>(&self, occurrences: &'a [BirthdayOccurrence]) -> Vec<&'a BirthdayOccurrence> {
        let mut due: Vec<&BirthdayOccurrence> =
            occurrences.iter().filter(|o| o.reminder_due()).collect();
        due.sort_by_key(|o| o.days_until);
        due
    }

    /// Notify for every due occurrence. A failed notification is logged and
    /// does not stop the rest.
    pub fn send_due(&self, occurrences: &[BirthdayOccurrence]) -> ReminderReport {
        let mut report = ReminderReport::default();
        let due = self.due(occurrences);

        if !self.notifier.is_enabled() {
            report.skipped = due.len();
            log::info!(
                "Notifications disabled, {} reminder(s) not sent",
                report.skipped
            );
            return report;
        }

        for occurrence in due {
            let urgency = if occurrence.is_today {
                NotificationUrgency::Critical
            } else {
                NotificationUrgency::Normal
            };
            let title = format!(
                "{} {}'s birthday",
                occurrence.birthday.category.icon(),
                occurrence.birthday.name
            );

            match self
                .notifier
                .notify(&title, &occurrence.countdown_text(), urgency)
            {
                Ok(()) => report.sent += 1,
                Err(e) => {
                    log::warn!(
                        "Failed to send reminder for '{}': {}",
                        occurrence.birthday.name,
                        e
                    );
                    report.failed += 1;
                }
            }
        }

        log::info!(
            "Reminder pass: {} sent, {} failed",
            report.sent,
            report.failed
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::birthday::Birthday;
    use crate::services::notification::MockNotifier;
    use chrono::NaiveDate;

    fn occurrence(name: &str, days_until: i64, reminder_days: u32) -> BirthdayOccurrence {
        let mut birthday = Birthday::new(name, "1990-06-15").unwrap();
        birthday.reminder_days = reminder_days;
        BirthdayOccurrence {
            birthday,
            anniversary: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            days_until,
            is_today: days_until == 0,
            age: None,
        }
    }

    #[test]
    fn test_due_filters_by_reminder_days() {
        let service = ReminderService::new(MockNotifier::new());
        let occurrences = vec![
            occurrence("Later", 10, 1),
            occurrence("Soon", 3, 7),
            occurrence("Today", 0, 0),
        ];

        let names: Vec<&str> = service
            .due(&occurrences)
            .iter()
            .map(|o| o.birthday.name.as_str())
            .collect();
        assert_eq!(names, vec!["Today", "Soon"]);
    }

    #[test]
    fn test_send_due_uses_urgency_and_countdown_text() {
        let mut notifier = MockNotifier::new();
        notifier.expect_is_enabled().return_const(true);
        notifier
            .expect_notify()
            .withf(|title, body, urgency| {
                title.contains("Today")
                    && body == "Today is the day!"
                    && *urgency == NotificationUrgency::Critical
            })
            .times(1)
            .returning(|_, _, _| Ok(()));
        notifier
            .expect_notify()
            .withf(|title, body, urgency| {
                title.contains("Soon")
                    && body == "3 days to go"
                    && *urgency == NotificationUrgency::Normal
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = ReminderService::new(notifier);
        let report = service.send_due(&[
            occurrence("Soon", 3, 7),
            occurrence("Today", 0, 1),
            occurrence("Later", 10, 1),
        ]);
        assert_eq!(report, ReminderReport { sent: 2, failed: 0, skipped: 0 });
    }

    #[test]
    fn test_send_due_continues_after_failure() {
        let mut notifier = MockNotifier::new();
        notifier.expect_is_enabled().return_const(true);
        notifier
            .expect_notify()
            .times(2)
            .returning(|title, _, _| {
                if title.contains("Broken") {
                    Err(anyhow::anyhow!("no notification daemon"))
                } else {
                    Ok(())
                }
            });

        let service = ReminderService::new(notifier);
        let report = service.send_due(&[occurrence("Broken", 0, 1), occurrence("Fine", 1, 1)]);
        assert_eq!(report, ReminderReport { sent: 1, failed: 1, skipped: 0 });
    }

    #[test]
    fn test_send_due_skips_when_notifications_disabled() {
        let mut notifier = MockNotifier::new();
        notifier.expect_is_enabled().return_const(false);
        notifier.expect_notify().never();

        let service = ReminderService::new(notifier);
        let report = service.send_due(&[
            occurrence("Today", 0, 1),
            occurrence("Soon", 1, 1),
            occurrence("Later", 10, 1),
        ]);
        assert_eq!(report, ReminderReport { sent: 0, failed: 0, skipped: 2 });
    }
}
