//! `socialnet` interactive shell entry point.
//!
//! # Responsibility
//! - Parse CLI configuration, start logging and open the store.
//! - Hand stdin/stdout to the menu loop.

mod args;
mod menu;

use args::Cli;
use clap::Parser;
use log::error;
use menu::Shell;
use socialnet_core::db::{open_db, open_db_in_memory};
use socialnet_core::{default_log_level, init_logging, StatusCollection, UserCollection};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    match resolve_log_dir(cli.log_dir.clone()) {
        Ok(log_dir) => {
            if let Err(err) = init_logging(&log_level, &log_dir) {
                eprintln!("warning: logging disabled: {err}");
            }
        }
        Err(err) => eprintln!("warning: logging disabled: {err}"),
    }

    let opened = if cli.memory {
        open_db_in_memory()
    } else {
        open_db(&cli.db)
    };
    let conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open database: {err}");
            return ExitCode::FAILURE;
        }
    };

    let collections = UserCollection::try_new(&conn)
        .and_then(|users| StatusCollection::try_new(&conn).map(|statuses| (users, statuses)));
    let (users, statuses) = match collections {
        Ok(collections) => collections,
        Err(err) => {
            eprintln!("database is not usable: {err}");
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(&users, &statuses, stdin.lock(), stdout.lock());
    match shell.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=shell_exit module=cli status=error error={err}");
            eprintln!("fatal: {err}");
            ExitCode::FAILURE
        }
    }
}

fn resolve_log_dir(configured: Option<PathBuf>) -> io::Result<PathBuf> {
    let dir = configured.unwrap_or_else(|| PathBuf::from("logs"));
    if dir.is_absolute() {
        return Ok(dir);
    }
    Ok(std::env::current_dir()?.join(dir))
}
