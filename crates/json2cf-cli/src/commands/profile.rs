//! Profile command implementation

use std::path::Path;

use colored::Colorize;

use json2cf_sync::load_profile;

use crate::error::Result;

/// Run the profile command
///
/// Lists the rules of a profile in application order.
pub fn run_profile(path: &Path, json: bool) -> Result<()> {
    let profile = load_profile(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(profile.rules())?);
        return Ok(());
    }

    println!(
        "{} {} rule(s) in {}",
        "=>".blue().bold(),
        profile.len(),
        path.display()
    );
    for rule in &profile {
        println!(
            "   {} {} {} ({})",
            rule.field_name.cyan(),
            "<-".dimmed(),
            rule.external,
            rule.kind.to_string().dimmed()
        );
    }
    if profile.skipped() > 0 {
        println!(
            "{} {} malformed entr{} ignored",
            "WARN".yellow().bold(),
            profile.skipped(),
            if profile.skipped() == 1 { "y" } else { "ies" }
        );
    }

    Ok(())
}
