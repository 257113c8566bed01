//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// json2cf - Keep record fields in step with an external JSON API
#[derive(Parser, Debug)]
#[command(name = "json2cf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also append log events to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Synchronize records with the external API
    ///
    /// Examples:
    ///   json2cf sync                          # Uses ./json2cf.toml
    ///   json2cf sync -c task.toml --dry-run   # Preview without saving
    Sync {
        /// Task configuration file
        #[arg(short, long, default_value = "json2cf.toml", env = "JSON2CF_CONFIG")]
        config: PathBuf,

        /// Reconcile records without saving them
        #[arg(long)]
        dry_run: bool,

        /// Output the report as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show the rules of a mapping profile
    Profile {
        /// Profile document
        path: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Reconcile one record file against one payload file without saving
    Reconcile {
        /// Profile document
        #[arg(long)]
        profile: PathBuf,

        /// Record document
        #[arg(long)]
        record: PathBuf,

        /// Fetched JSON document
        #[arg(long)]
        payload: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
