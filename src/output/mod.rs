//! Report output formats.
//!
//! - [`table`]: column-aligned text (default)
//! - [`json`]: machine-readable JSON

pub mod json;
pub mod table;

use std::io::{self, Write};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::duplicates::FileGroups;

/// Output format for scan results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Column-aligned table
    #[default]
    Table,
    /// JSON output for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl OutputFormat {
    /// Write `groups` to `out` in this format.
    pub fn write_report<W: Write>(self, groups: &FileGroups, out: &mut W) -> io::Result<()> {
        match self {
            OutputFormat::Table => table::write_report(groups, out),
            OutputFormat::Json => json::write_report(groups, out),
        }
    }
}
