//! dupseek - concurrent duplicate finder and graceful-shutdown ticker
//!
//! Two small tools built on the same ambient stack:
//!
//! - `dupseek` walks a directory tree with one task per subdirectory,
//!   groups files by name and size, reports the duplicate sets and can
//!   delete every copy but the one with the shortest path.
//! - `ticker` prints a timestamp every interval and, on the first
//!   interrupt, stops its background task with a bounded wait for
//!   acknowledgement.

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod prompt;
pub mod scanner;
pub mod signal;
pub mod ticker;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use cli::{Cli, TickerCli};
use config::Config;
use duplicates::DuplicateFinder;
use error::ExitCode;
use scanner::FileSystem;
use signal::InterruptListener;
use ticker::{ShutdownOutcome, TickerService, TickerSettings};

/// Run the `dupseek` binary against the real terminal.
///
/// # Errors
///
/// Fails if the configuration cannot be loaded or the report cannot be
/// written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let config = load_config(cli.config.as_deref())?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_scan(
        &cli,
        config,
        &mut DuplicateFinder::with_defaults(),
        &mut stdin.lock(),
        &mut stdout.lock(),
    )
}

/// Scan, report and, if requested and confirmed, remove duplicates.
///
/// The report and the confirmation prompt go to `out`; the answer is read
/// from `input`. A failed confirmation read skips deletion and yields
/// [`ExitCode::ConfirmationFailed`]; the report has already been written.
///
/// # Errors
///
/// Fails if the report cannot be written.
pub fn run_scan<F, R, W>(
    cli: &Cli,
    mut config: Config,
    finder: &mut DuplicateFinder<F>,
    input: &mut R,
    out: &mut W,
) -> Result<ExitCode>
where
    F: FileSystem,
    R: BufRead,
    W: Write,
{
    config.apply_cli(cli);
    if cli.print_config {
        out.write_all(config.to_toml()?.as_bytes())?;
        return Ok(ExitCode::Success);
    }
    let scan = &config.scan;

    let groups = finder.seek(&scan.path, scan.max_depth);
    let has_duplicates = !groups.is_empty();

    finder
        .write_report(scan.format, out)
        .context("Failed to write duplicate report")?;

    if !cli.remove || !has_duplicates {
        return Ok(ExitCode::Success);
    }

    match prompt::confirm(prompt::DELETE_PROMPT, input, out) {
        Ok(true) => {
            log::info!("Removing...");
            let summary = finder.remove_all_duplicates();
            if !summary.all_succeeded() {
                log::warn!("{} file(s) could not be removed", summary.failure_count());
            }
            Ok(ExitCode::Success)
        }
        Ok(false) => {
            log::info!("Deletion declined");
            Ok(ExitCode::Success)
        }
        Err(e) => {
            log::error!("{}", e);
            Ok(ExitCode::ConfirmationFailed)
        }
    }
}

/// Run the `ticker` binary until the first interrupt.
///
/// # Errors
///
/// Fails if configuration, signal installation or the task itself fails.
pub fn run_ticker(cli: TickerCli) -> Result<ExitCode> {
    let mut config = load_config(cli.config.as_deref())?;
    config.apply_ticker_cli(&cli);

    let listener = signal::install_handler()?;
    run_ticker_with(
        config.ticker.settings(),
        &listener,
        io::stdout(),
        &mut io::stdout(),
    )
}

/// Tick into `sink` until `listener` fires, then shut down and report the
/// outcome on `out`.
///
/// A clean stop maps to [`ExitCode::Success`], a timed-out one to
/// [`ExitCode::ShutdownTimedOut`].
///
/// # Errors
///
/// Fails if the task cannot be started, exits without acknowledging, or
/// the outcome cannot be written.
pub fn run_ticker_with<S, W>(
    settings: TickerSettings,
    listener: &InterruptListener,
    sink: S,
    out: &mut W,
) -> Result<ExitCode>
where
    S: Write + Send + 'static,
    W: Write,
{
    let mut service = TickerService::start(settings, sink)?;

    listener.wait();

    let outcome = service.shutdown()?;
    writeln!(out, "{}", outcome.message())?;
    out.flush()?;

    Ok(match outcome {
        ShutdownOutcome::Clean => ExitCode::Success,
        ShutdownOutcome::TimedOut => ExitCode::ShutdownTimedOut,
    })
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    Config::load_from(path).with_context(|| match path {
        Some(path) => format!("Failed to load config from {}", path.display()),
        None => "Failed to load configuration".to_string(),
    })
}
