// Birthday Reminder
// Command-line entry point

use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    log::info!("Starting Birthday Reminder");

    let args: Vec<String> = env::args().skip(1).collect();
    match birthday_reminder::cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
