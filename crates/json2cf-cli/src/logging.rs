//! Tracing subscriber setup for the json2cf binary

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

use crate::error::{CliError, Result};

/// Install the process-wide subscriber.
///
/// Console output goes to stderr, filtered by `RUST_LOG` or, when unset, at
/// `warn` (`debug` with `verbose`). With `log_file`, every `info` and above
/// event (or `debug` with `verbose`) is also appended to that file without
/// ANSI colors.
pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let console_level = if verbose { "debug" } else { "warn" };
    let console_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(console_level))
        .map_err(|e| CliError::Logging {
            message: e.to_string(),
        })?;

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact()
        .with_filter(console_filter);

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| CliError::Logging {
                    message: format!("cannot open {}: {e}", path.display()),
                })?;
            let file_level = if verbose { "debug" } else { "info" };
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false)
                    .with_filter(EnvFilter::new(file_level)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| CliError::Logging {
            message: e.to_string(),
        })?;

    tracing::debug!(verbose, log_file = ?log_file, "Logging initialized");
    Ok(())
}
