//! json2cf CLI
//!
//! Command-line front end for synchronizing records with an external JSON API.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} record synchronization", "json2cf".green().bold());
            println!();
            println!("Run {} for available commands.", "json2cf --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Sync {
            config,
            dry_run,
            json,
        } => commands::run_sync(&config, dry_run, json),
        Commands::Profile { path, json } => commands::run_profile(&path, json),
        Commands::Reconcile {
            profile,
            record,
            payload,
            json,
        } => commands::run_reconcile(&profile, &record, &payload, json),
    }
}
