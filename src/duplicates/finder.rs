//! Duplicate finder: scan, report, remove.
//!
//! # Overview
//!
//! [`DuplicateFinder`] owns the result of the last scan and drives the
//! three phases:
//! 1. **Seek**: concurrent walk (see [`crate::scanner::walker`]), then
//!    filtering down to duplicate sets once every scan task has finished
//! 2. **Report**: [`DuplicateFinder::print_duplicates`]
//! 3. **Remove**: [`DuplicateFinder::remove_all_duplicates`]
//!
//! # Example
//!
//! ```no_run
//! use dupseek::duplicates::DuplicateFinder;
//! use std::path::Path;
//!
//! let mut finder = DuplicateFinder::with_defaults();
//! finder.seek(Path::new("."), 0);
//! finder.print_duplicates(&mut std::io::stdout()).unwrap();
//! ```

use std::io::{self, Write};
use std::path::Path;

use crate::actions::delete::{remove_duplicates, RemovalSummary};
use crate::output::OutputFormat;
use crate::scanner::walker::scan_tree;
use crate::scanner::{FileSystem, OsFileSystem};

use super::FileGroups;

/// Finds, reports and removes duplicate files.
#[derive(Debug)]
pub struct DuplicateFinder<F = OsFileSystem> {
    fs: F,
    groups: FileGroups,
}

impl DuplicateFinder<OsFileSystem> {
    /// Create a finder over the real file system.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(OsFileSystem)
    }
}

impl<F: FileSystem> DuplicateFinder<F> {
    /// Create a finder over `fs`.
    #[must_use]
    pub fn new(fs: F) -> Self {
        Self {
            fs,
            groups: FileGroups::new(),
        }
    }

    /// Scan `root` and keep only duplicate groups.
    ///
    /// `max_depth <= 0` means unlimited depth; otherwise subdirectories are
    /// entered while their parent's level (root = 1) is below `max_depth`.
    /// Replaces the result of any previous scan.
    pub fn seek(&mut self, root: &Path, max_depth: i64) -> &FileGroups {
        let mut groups = scan_tree(&self.fs, root, max_depth);
        let scanned = groups.file_count();
        groups.retain_duplicates();

        log::info!(
            "Scanned {} file(s), found {} duplicate group(s)",
            scanned,
            groups.len()
        );

        self.groups = groups;
        &self.groups
    }

    /// The file system this finder scans and deletes through.
    #[must_use]
    pub fn file_system(&self) -> &F {
        &self.fs
    }

    /// Groups found by the last [`seek`](Self::seek).
    #[must_use]
    pub fn groups(&self) -> &FileGroups {
        &self.groups
    }

    /// Write the table report of the current groups.
    pub fn print_duplicates<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.write_report(OutputFormat::Table, out)
    }

    /// Write the report of the current groups in `format`.
    pub fn write_report<W: Write>(&self, format: OutputFormat, out: &mut W) -> io::Result<()> {
        format.write_report(&self.groups, out)
    }

    /// Delete every file except the first of each group.
    pub fn remove_all_duplicates(&self) -> RemovalSummary {
        let summary = remove_duplicates(&self.fs, &self.groups);
        log::info!("{}", summary.summary());
        summary
    }
}
