//! Sync command implementation

use std::path::Path;

use colored::Colorize;

use json2cf_store::FsRecordStore;
use json2cf_sync::{
    HttpFetcher, LogEventSink, OutcomeStatus, SyncConfig, SyncEngine, SyncOptions, SyncReport,
};

use crate::error::{CliError, Result};

/// Run the sync command
///
/// Loads the task configuration, synchronizes every record in the configured
/// categories, and fails when any record failed. Configuration is validated by
/// the engine before any record is read.
pub fn run_sync(config_path: &Path, dry_run: bool, json: bool) -> Result<()> {
    let config = SyncConfig::load(config_path)?;

    let store = FsRecordStore::open(&config.paths.records_dir)?;
    let fetcher = HttpFetcher::new(&config.http)?;
    let events = LogEventSink;
    let engine = SyncEngine::new(&config, &store, &fetcher, &events);

    if !json {
        let prefix = if dry_run { "[dry-run] " } else { "" };
        println!(
            "{} {}Synchronizing categories {:?}...",
            "=>".blue().bold(),
            prefix,
            config.task.categories
        );
    }

    let report = engine.run(&SyncOptions { dry_run })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    let failed = report.count(OutcomeStatus::Failed);
    if failed > 0 {
        return Err(CliError::user(format!(
            "{failed} record(s) failed to synchronize"
        )));
    }

    Ok(())
}

fn print_report(report: &SyncReport) {
    for outcome in &report.outcomes {
        let label = match outcome.status {
            OutcomeStatus::Updated => "UPDATED".green().bold(),
            OutcomeStatus::Unchanged => "UNCHANGED".dimmed(),
            OutcomeStatus::Skipped => "SKIPPED".yellow().bold(),
            OutcomeStatus::Failed => "FAILED".red().bold(),
        };
        print!("   {} #{} {}", label, outcome.record_id, outcome.title.cyan());
        if !outcome.changed_fields.is_empty() {
            print!(" ({})", outcome.changed_fields.join(", "));
        }
        if let Some(message) = &outcome.message {
            print!(": {}", message);
        }
        println!();
    }

    println!();
    println!(
        "{} {} updated, {} unchanged, {} skipped, {} failed{}",
        if report.success() {
            "OK".green().bold()
        } else {
            "DONE".yellow().bold()
        },
        report.count(OutcomeStatus::Updated),
        report.count(OutcomeStatus::Unchanged),
        report.count(OutcomeStatus::Skipped),
        report.count(OutcomeStatus::Failed),
        if report.dry_run { " (dry run, nothing saved)" } else { "" }
    );
}
