//! Command-line front end: argument parsing, wiring and help text.

use std::fs;
use std::io;

use anyhow::{Context, Result};
use chrono::Local;

use crate::services::auth::LocalSession;
use crate::services::birthday::BirthdayService;
use crate::services::database::Database;
use crate::services::notification::DesktopNotifier;
use crate::services::occurrence::OccurrenceCalculator;
use crate::services::reminder::ReminderService;
use crate::services::settings::SettingsService;
use crate::services::store::SqliteBirthdayStore;

pub mod args;
pub mod commands;

pub use args::{parse_args, Command, Invocation};
pub use commands::CommandContext;

/// Parse `args` (without the program name), open the configured database
/// and run the requested command against stdout.
pub fn run(args: &[String]) -> Result<()> {
    let invocation = parse_args(args)?;
    if matches!(invocation.command, Command::Help) {
        print_help("birthday-reminder");
        return Ok(());
    }

    let config_path = match invocation.config {
        Some(path) => path,
        None => SettingsService::default_config_path()?,
    };
    let settings = SettingsService::load(&config_path)?;

    let db_path = SettingsService::database_path(&settings)?;
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory {}", parent.display()))?;
    }

    let db = Database::open(&db_path)?;
    log::info!("Using database at {}", db_path.display());

    let service = BirthdayService::new(
        LocalSession::from_config(settings.user.as_deref()),
        SqliteBirthdayStore::new(db.connection()),
    )
    .with_calculator(OccurrenceCalculator::new(settings.leap_day_policy))
    .with_upcoming_window(settings.upcoming_window_days);
    let reminders = ReminderService::new(DesktopNotifier::new(settings.notifications_enabled));

    let context = CommandContext {
        service: &service,
        reminders: &reminders,
        today: Local::now().date_naive(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    context.execute(invocation.command, &mut out)
}

pub fn print_help(binary_name: &str) {
    println!(
        "Birthday Reminder v{} - Keep track of the birthdays that matter",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--config <path>] [<command>]", binary_name);
    println!();
    println!("COMMANDS:");
    println!("    upcoming [<days>]                 Birthdays in the next <days> (default from config)");
    println!("    list [--search <text>] [--category <c|all>] [--sort date|name]");
    println!("    add <name> <YYYY-MM-DD> [--description <text>] [--reminder-days <n>]");
    println!("        [--category <c>] [--once]");
    println!("    edit <id> [--name <n>] [--date <d>] [--description <text>]");
    println!("        [--reminder-days <n>] [--category <c>] [--recurring true|false]");
    println!("    remove <id>                       Delete a birthday");
    println!("    stats                             Totals, upcoming and per-category counts");
    println!("    remind                            Send desktop notifications for due reminders");
    println!("    export [<file>]                   Write birthdays as JSON (stdout by default)");
    println!("    import <file>                     Add birthdays from an exported JSON file");
    println!("    help                              Show this help message");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <path>   Use a different config file.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("CATEGORIES:");
    println!("    family, friend, colleague, other");
    println!();
    println!("EXAMPLES:");
    println!("    {} add \"Ada Lovelace\" 1815-12-10 --category friend -r 3", binary_name);
    println!("    {} upcoming 14", binary_name);
    println!("    {} list --search ada --sort name", binary_name);
    println!("    {} export > backup.json", binary_name);
    println!();
    println!("Set RUST_LOG=debug for detailed logging.");
}
