//! Command-line interface definitions.
//!
//! Two binaries share this crate:
//! - `dupseek` ([`Cli`]): find and optionally remove duplicate files
//! - `ticker` ([`TickerCli`]): periodic ticker that shuts down gracefully
//!
//! Unset options fall back to the layered configuration (see
//! [`crate::config`]).
//!
//! # Example
//!
//! ```bash
//! # Report duplicates below the current directory
//! dupseek
//!
//! # Only look two levels deep and offer to delete the copies
//! dupseek --path ~/Downloads --maxdepth 2 --remove
//!
//! # Tick every 500ms, wait at most 2s for shutdown
//! ticker --interval-ms 500 --timeout-ms 2000
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Find duplicate files (same name and size) and optionally delete them.
#[derive(Debug, Parser)]
#[command(name = "dupseek")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(long, value_name = "FILE", env = "DUPSEEK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory to start the search from [default: .]
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Maximum depth of subdirectories to search; <= 0 means unlimited [default: 0]
    #[arg(long = "maxdepth", value_name = "N", allow_negative_numbers = true)]
    pub max_depth: Option<i64>,

    /// Offer to delete all but one file of every duplicate group
    #[arg(long)]
    pub remove: bool,

    /// Report format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

/// Print a timestamp periodically until interrupted, then shut down gracefully.
#[derive(Debug, Parser)]
#[command(name = "ticker")]
#[command(author, version, about, long_about = None)]
pub struct TickerCli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(long, value_name = "FILE", env = "DUPSEEK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Milliseconds between ticks [default: 1000]
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Milliseconds to wait for the task to acknowledge shutdown [default: 1000]
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Upper bound of the random cleanup delay in milliseconds [default: 2000]
    #[arg(long, value_name = "MS")]
    pub max_cleanup_ms: Option<u64>,
}
