//! CLI module.
//!
//! The dispatcher runs early in `main()` so that `--version`, `--help` and
//! `--report` never touch the terminal:
//!
//! ```ignore
//! use noema_dash::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! if let Some(result) = run_cli_command(&command) {
//!     return result;
//! }
//! // No CLI command, continue to TUI
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand, CliOverrides};
pub use version::{version_line, USAGE, VERSION};

use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::api::RunApiClient;
use crate::config::DashConfig;
use crate::report::save_report;

/// Run the commands that need no async runtime.
///
/// Returns `None` for commands handled elsewhere (`RunTui`, `Report`).
pub fn run_cli_command(command: &CliCommand) -> Option<Result<()>> {
    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            Some(Ok(()))
        }
        CliCommand::Help => {
            print!("{}", USAGE);
            Some(Ok(()))
        }
        CliCommand::Invalid(message) => Some(Err(color_eyre::eyre::eyre!(
            "{}\n\nRun with --help for usage.",
            message
        ))),
        CliCommand::Report { .. } | CliCommand::RunTui(_) => None,
    }
}

/// Fetch one snapshot and write it as an HTML report.
pub async fn run_report(config: &DashConfig, path: &Path) -> Result<PathBuf> {
    let client = RunApiClient::from_config(config)?;

    let snapshot = match client.fetch_snapshot(config.narrative_limit).await {
        Ok(snapshot) => snapshot,
        Err(e) => bail!("could not fetch run from {}: {}", config.base_url, e.user_message()),
    };

    let written = save_report(&snapshot, path)
        .wrap_err_with(|| format!("writing report for tick {}", snapshot.state.tick))?;
    info!("Wrote report for tick {} to {}", snapshot.state.tick, written.display());
    Ok(written)
}
