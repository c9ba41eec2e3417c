//! Hand-rolled argument parsing for the `birthday-reminder` binary.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};

use crate::models::birthday::{BirthdayId, BirthdayUpdate, NewBirthday};
use crate::models::category::Category;
use crate::services::listing::{BirthdayFilter, SortOrder};

/// Parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub config: Option<PathBuf>,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List(BirthdayFilter),
    /// Window in days; `None` uses the configured one.
    Upcoming(Option<u32>),
    Add(NewBirthday),
    Edit(BirthdayId, BirthdayUpdate),
    Remove(BirthdayId),
    Stats,
    Remind,
    /// Target file; `None` writes to stdout.
    Export(Option<PathBuf>),
    Import(PathBuf),
    Help,
}

/// Parse `args` without the program name.
pub fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut config = None;
    let mut rest = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                config = Some(PathBuf::from(take_value(args, &mut i)?));
            }
            "-h" | "--help" => {
                return Ok(Invocation {
                    config,
                    command: Command::Help,
                })
            }
            _ => rest.push(args[i].clone()),
        }
        i += 1;
    }

    let command = match rest.split_first() {
        None => Command::Upcoming(None),
        Some((name, tail)) => parse_command(name, tail)?,
    };

    Ok(Invocation { config, command })
}

fn parse_command(name: &str, args: &[String]) -> Result<Command> {
    match name {
        "list" | "ls" => parse_list(args),
        "upcoming" => match args {
            [] => Ok(Command::Upcoming(None)),
            [days] => Ok(Command::Upcoming(Some(parse_number(days, "days")?))),
            _ => bail!("Usage: upcoming [<days>]"),
        },
        "add" => parse_add(args),
        "edit" => parse_edit(args),
        "remove" | "rm" | "delete" => match args {
            [id] => Ok(Command::Remove(parse_id(id)?)),
            _ => bail!("Usage: remove <id>"),
        },
        "stats" => Ok(Command::Stats),
        "remind" => Ok(Command::Remind),
        "export" => match args {
            [] => Ok(Command::Export(None)),
            [file] => Ok(Command::Export(Some(PathBuf::from(file)))),
            _ => bail!("Usage: export [<file>]"),
        },
        "import" => match args {
            [file] => Ok(Command::Import(PathBuf::from(file))),
            _ => bail!("Usage: import <file>"),
        },
        "help" => Ok(Command::Help),
        other => bail!("Unknown command '{}'. Run with --help for usage.", other),
    }
}

fn parse_list(args: &[String]) -> Result<Command> {
    let mut filter = BirthdayFilter::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--search" | "-s" => filter = filter.search(take_value(args, &mut i)?),
            "--category" => filter = filter.category(parse_category_filter(&take_value(args, &mut i)?)?),
            "--sort" => {
                let sort: SortOrder = take_value(args, &mut i)?.parse().map_err(|e| anyhow!("{}", e))?;
                filter = filter.sort(sort);
            }
            other => bail!("Unexpected argument '{}' for list", other),
        }
        i += 1;
    }
    Ok(Command::List(filter))
}

fn parse_add(args: &[String]) -> Result<Command> {
    let mut positional = Vec::new();
    let mut birthday = NewBirthday::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--description" | "-d" => birthday = birthday.description(take_value(args, &mut i)?),
            "--reminder-days" | "-r" => {
                birthday = birthday.reminder_days(parse_number(&take_value(args, &mut i)?, "reminder days")?)
            }
            "--category" => birthday = birthday.category(take_value(args, &mut i)?.parse()?),
            "--once" => birthday = birthday.recurring(false),
            _ => positional.push(args[i].clone()),
        }
        i += 1;
    }

    match positional.as_slice() {
        [name, date] => {
            birthday.name = name.clone();
            birthday.date = date.clone();
        }
        _ => bail!("Usage: add <name> <YYYY-MM-DD> [options]"),
    }
    birthday.validate()?;
    Ok(Command::Add(birthday))
}

fn parse_edit(args: &[String]) -> Result<Command> {
    let (id, flags) = args
        .split_first()
        .ok_or_else(|| anyhow!("Usage: edit <id> [options]"))?;
    let id = parse_id(id)?;

    let mut update = BirthdayUpdate::default();
    let mut i = 0;
    while i < flags.len() {
        match flags[i].as_str() {
            "--name" => update.name = Some(take_value(flags, &mut i)?),
            "--date" => update.date = Some(take_value(flags, &mut i)?),
            "--description" | "-d" => update.description = Some(take_value(flags, &mut i)?),
            "--reminder-days" | "-r" => {
                update.reminder_days = Some(parse_number(&take_value(flags, &mut i)?, "reminder days")?)
            }
            "--category" => update.category = Some(take_value(flags, &mut i)?.parse()?),
            "--recurring" => {
                let value = take_value(flags, &mut i)?;
                update.is_recurring = Some(
                    value
                        .parse::<bool>()
                        .with_context(|| format!("Expected true or false, got '{}'", value))?,
                );
            }
            other => bail!("Unexpected argument '{}' for edit", other),
        }
        i += 1;
    }

    if update.is_empty() {
        bail!("Nothing to change. Pass at least one of --name, --date, --description, --reminder-days, --category, --recurring");
    }
    Ok(Command::Edit(id, update))
}

/// "all" (or "any") clears the category filter.
fn parse_category_filter(value: &str) -> Result<Option<Category>> {
    match value.trim().to_lowercase().as_str() {
        "all" | "any" => Ok(None),
        other => Ok(Some(other.parse()?)),
    }
}

fn take_value(args: &[String], i: &mut usize) -> Result<String> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| anyhow!("Missing value for {}", flag))
}

fn parse_id(value: &str) -> Result<BirthdayId> {
    value
        .parse::<i64>()
        .map(BirthdayId)
        .with_context(|| format!("Invalid birthday id '{}'", value))
}

fn parse_number(value: &str, what: &str) -> Result<u32> {
    value
        .parse::<u32>()
        .with_context(|| format!("Invalid {} '{}'", what, value))
}
