//! JSON report.
//!
//! Groups are emitted in the same order as the table report: ascending key,
//! members in canonical-first order.

use std::io::{self, Write};

use serde::Serialize;

use crate::duplicates::{FileGroups, GroupKey};
use crate::scanner::FileRecord;

/// Serializable view of one duplicate group.
#[derive(Debug, Serialize)]
pub struct JsonGroup<'a> {
    /// Group identity key
    pub key: &'a GroupKey,
    /// Members, canonical file first
    pub files: &'a [FileRecord],
}

/// Serializable view of a whole report.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    /// Number of groups
    pub duplicate_groups: usize,
    /// Files cleanup would remove
    pub redundant_files: usize,
    /// Bytes cleanup would free
    pub reclaimable_bytes: u64,
    /// The groups themselves
    pub groups: Vec<JsonGroup<'a>>,
}

impl<'a> JsonReport<'a> {
    /// Build a report view over `groups`.
    #[must_use]
    pub fn new(groups: &'a FileGroups) -> Self {
        Self {
            duplicate_groups: groups.len(),
            redundant_files: groups.redundant_count(),
            reclaimable_bytes: groups.reclaimable_bytes(),
            groups: groups
                .sorted()
                .map(|(key, files)| JsonGroup { key, files })
                .collect(),
        }
    }
}

/// Write the report as pretty-printed JSON.
pub fn write_report<W: Write>(groups: &FileGroups, out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &JsonReport::new(groups))?;
    writeln!(out)?;
    out.flush()
}
