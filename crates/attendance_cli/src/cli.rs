use crate::console::Console;
use crate::error::CliError;
use crate::menu::run_menu;
use attendance_core::{
    core_version, init_logging, logging_status, AppConfig, ConfigOverrides, FileRosterRepository,
    RosterService,
};
use clap::{Parser, Subcommand};
use log::info;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "attendance", version, about = "Track student attendance in a CSV roster")]
pub struct Cli {
    /// Roster file (defaults to $ATTENDANCE_ROSTER or students.csv)
    #[arg(long, global = true)]
    pub roster: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    /// Directory for rolling log files; logging is off when unset
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive attendance menu (default)
    Menu,
    /// Print the roster read with the headerless format
    Show,
    /// Append a student to the roster file
    Add { first_name: String, last_name: String },
    /// Rename the first student matching the old name
    Edit {
        old_first_name: String,
        old_last_name: String,
        new_first_name: String,
        new_last_name: String,
    },
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            roster_path: self.roster.clone(),
            log_level: self.log_level.clone(),
            log_dir: self.log_dir.clone(),
        }
    }
}

pub fn run(cli: Cli) -> Result<(), CliError> {
    let config = AppConfig::from_env()?.with_overrides(&cli.overrides())?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, log_dir).map_err(CliError::Logging)?;
    }
    if let Some((level, log_dir)) = logging_status() {
        info!(
            "event=cli_start module=cli status=ok version={} level={} log_dir={}",
            core_version(),
            level,
            log_dir.display()
        );
    }

    let mut service = RosterService::new(FileRosterRepository::new(&config.roster_path));
    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            let stdin = io::stdin();
            let mut console = Console::new(stdin.lock(), io::stdout());
            run_menu(&mut console, &mut service)?;
        }
        Command::Show => {
            for record in service.import()? {
                println!(
                    "{} {}: {}",
                    record.first_name,
                    record.last_name,
                    record.present.label()
                );
            }
        }
        Command::Add {
            first_name,
            last_name,
        } => {
            let added = service.add(&first_name, &last_name)?;
            println!(
                "Student {} was added to {}.",
                added.full_name(),
                config.roster_path.display()
            );
        }
        Command::Edit {
            old_first_name,
            old_last_name,
            new_first_name,
            new_last_name,
        } => {
            service.edit(&old_first_name, &old_last_name, &new_first_name, &new_last_name)?;
            println!(
                "Student {} {} renamed to {} {}.",
                old_first_name.trim(),
                old_last_name.trim(),
                new_first_name.trim(),
                new_last_name.trim()
            );
        }
    }
    Ok(())
}
