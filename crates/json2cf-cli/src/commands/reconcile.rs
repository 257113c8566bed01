//! Reconcile command implementation
//!
//! Offline counterpart of a single sync step: nothing is fetched or saved.

use std::fs;
use std::path::Path;

use colored::Colorize;
use serde_json::json;

use json2cf_map::{Profile, reconcile, subform};
use json2cf_store::fs::read_record;
use json2cf_sync::parse_payload;

use crate::error::{CliError, Result};

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| CliError::user(format!("Cannot read {}: {e}", path.display())))
}

/// Run the reconcile command
pub fn run_reconcile(profile_path: &Path, record_path: &Path, payload_path: &Path, json: bool) -> Result<()> {
    let profile = Profile::parse(&read_file(profile_path)?)?;
    let record = read_record(record_path)?;
    let payload = parse_payload(&read_file(payload_path)?)?;

    let outcome = reconcile(profile.rules(), record.fields, &payload);

    if json {
        let output = json!({
            "record_id": record.id,
            "changed": outcome.changed,
            "changes": outcome.changes,
            "fields": outcome.fields,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if !outcome.changed {
        println!("{} #{} is up to date.", "OK".green().bold(), record.id);
        return Ok(());
    }

    println!(
        "{} #{} would change {} field(s):",
        "CHANGED".yellow().bold(),
        record.id,
        outcome.changed_fields().len()
    );
    for change in &outcome.changes {
        let sub_field = outcome
            .fields
            .get(&change.field)
            .and_then(|field| field.subform_field.as_deref());

        let shown = match (change.kind.subform_protocol(), sub_field) {
            (Some(protocol), Some(id)) => subform::decode(&change.value, id, protocol)
                .map(|values| format!("[{}]", values.join(", ")))
                .unwrap_or_else(|| change.value.clone()),
            _ => change.value.clone(),
        };

        println!(
            "   {} {}: {} {} {}",
            "~".yellow(),
            change.field.cyan(),
            change.previous.dimmed(),
            "->".dimmed(),
            shown
        );
    }

    Ok(())
}
