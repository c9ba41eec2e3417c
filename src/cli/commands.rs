use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use super::args::Command;
use crate::models::birthday::{Birthday, NewBirthday};
use crate::models::occurrence::BirthdayOccurrence;
use crate::services::auth::AuthProvider;
use crate::services::birthday::BirthdayService;
use crate::services::listing::BirthdayFilter;
use crate::services::notification::Notifier;
use crate::services::reminder::ReminderService;
use crate::services::store::BirthdayStore;
use crate::utils::date::{format_birth_date, format_short, parse_birth_date};

/// Everything a command needs to run.
pub struct CommandContext<'s, A, S, N> {
    pub service: &'s BirthdayService<A, S>,
    pub reminders: &'s ReminderService<N>,
    pub today: NaiveDate,
}

impl<'s, A: AuthProvider, S: BirthdayStore, N: Notifier> CommandContext<'s, A, S, N> {
    pub fn execute(&self, command: Command, out: &mut dyn Write) -> Result<()> {
        match command {
            Command::List(filter) => self.list(&filter, out),
            Command::Upcoming(days) => self.upcoming(days, out),
            Command::Add(birthday) => {
                let created = self.service.create(birthday)?;
                writeln!(out, "Added {}", record_line(&created))?;
                Ok(())
            }
            Command::Edit(id, update) => {
                let updated = self.service.update(id, &update)?;
                writeln!(out, "Updated {}", record_line(&updated))?;
                Ok(())
            }
            Command::Remove(id) => {
                self.service.delete(id)?;
                writeln!(out, "Removed birthday {}", id)?;
                Ok(())
            }
            Command::Stats => self.stats(out),
            Command::Remind => {
                let occurrences = self.service.occurrences(self.today)?;
                let report = self.reminders.send_due(&occurrences);
                if report.skipped > 0 {
                    writeln!(
                        out,
                        "Notifications are disabled; {} due reminder(s) not sent",
                        report.skipped
                    )?;
                } else {
                    writeln!(
                        out,
                        "{} reminder(s) sent, {} failed",
                        report.sent, report.failed
                    )?;
                }
                Ok(())
            }
            Command::Export(path) => self.export(path.as_deref(), out),
            Command::Import(path) => self.import(&path, out),
            Command::Help => {
                super::print_help("birthday-reminder");
                Ok(())
            }
        }
    }

    fn list(&self, filter: &BirthdayFilter, out: &mut dyn Write) -> Result<()> {
        let records = filter.apply(self.service.list()?);
        if records.is_empty() {
            writeln!(out, "No birthdays found.")?;
        }
        for record in &records {
            writeln!(out, "{}", record_line(record))?;
        }
        Ok(())
    }

    fn upcoming(&self, days: Option<u32>, out: &mut dyn Write) -> Result<()> {
        let window = days.unwrap_or(self.service.upcoming_window_days());
        let upcoming = self.service.upcoming(window, self.today)?;
        if upcoming.is_empty() {
            writeln!(out, "No birthdays in the next {} days.", window)?;
        }
        for occurrence in &upcoming {
            writeln!(out, "{}", occurrence_line(occurrence))?;
        }
        Ok(())
    }

    fn stats(&self, out: &mut dyn Write) -> Result<()> {
        let stats = self.service.stats(self.today)?;
        writeln!(out, "Total birthdays: {}", stats.total)?;
        writeln!(
            out,
            "Upcoming ({} days): {}",
            self.service.upcoming_window_days(),
            stats.upcoming
        )?;
        writeln!(out, "Today: {}", stats.today)?;
        for (category, count) in &stats.categories {
            writeln!(out, "  {}: {}", category.display_name(), count)?;
        }
        Ok(())
    }

    fn export(&self, path: Option<&Path>, out: &mut dyn Write) -> Result<()> {
        let records = self.service.list()?;
        let json =
            serde_json::to_string_pretty(&records).context("Failed to serialize birthdays")?;

        match path {
            Some(path) => {
                fs::write(path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                log::info!("Exported {} birthdays to {}", records.len(), path.display());
                writeln!(out, "Exported {} birthdays to {}", records.len(), path.display())?;
            }
            None => writeln!(out, "{}", json)?,
        }
        Ok(())
    }

    /// Recreate exported records for the current user. Ids, owners and
    /// timestamps in the file are ignored, missing options take their
    /// defaults and invalid entries are skipped.
    fn import(&self, path: &Path, out: &mut dyn Write) -> Result<()> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let records: Vec<NewBirthday> = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        let mut imported = 0;
        let mut skipped = 0;
        for record in records {
            if let Err(e) = record.validate() {
                log::warn!("Skipping imported birthday '{}': {}", record.name, e);
                skipped += 1;
                continue;
            }
            self.service.create(record)?;
            imported += 1;
        }

        writeln!(out, "Imported {} birthdays ({} skipped)", imported, skipped)?;
        Ok(())
    }
}

/// `#3  👥 Ada  December 10, 1815 (remind 1d before)`
pub fn record_line(record: &Birthday) -> String {
    let id = record
        .id
        .map(|id| format!("#{}", id))
        .unwrap_or_else(|| "-".to_string());
    let date = parse_birth_date(&record.date)
        .map(|date| format_birth_date(&date))
        .unwrap_or_else(|_| record.date.clone());

    let mut line = format!(
        "{:<4} {} {}  {}  (remind {}d before)",
        id,
        record.category.icon(),
        record.name,
        date,
        record.reminder_days
    );
    if let Some(ref description) = record.description {
        line.push_str(&format!("  - {}", description));
    }
    line
}

/// `Jun 20  👥 Ada  5 days to go (Will turn 35)`
pub fn occurrence_line(occurrence: &BirthdayOccurrence) -> String {
    format!(
        "{:<6}  {} {}  {}",
        format_short(occurrence.anniversary),
        occurrence.birthday.category.icon(),
        occurrence.birthday.name,
        occurrence.countdown_text()
    )
}
