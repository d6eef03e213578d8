//! Duplicate grouping by name and size.
//!
//! # Overview
//!
//! Files are bucketed by a cheap identity key, [`GroupKey`], built from the
//! file name and byte size (`"copy1.txt_28"`). Two distinct files that
//! happen to share both are treated as duplicates: no content is read.
//!
//! After the scan, [`FileGroups::retain_duplicates`] drops singleton groups
//! and sorts every surviving group by ascending path length, so the first
//! member is the canonical file that cleanup keeps.
//!
//! # Example
//!
//! ```
//! use dupseek::duplicates::FileGroups;
//! use dupseek::scanner::FileRecord;
//!
//! let mut groups = FileGroups::new();
//! groups.insert(FileRecord::new("a.txt", "tmp/sub/a.txt", 3));
//! groups.insert(FileRecord::new("a.txt", "tmp/a.txt", 3));
//! groups.insert(FileRecord::new("b.txt", "tmp/b.txt", 3));
//! groups.retain_duplicates();
//!
//! assert_eq!(groups.len(), 1);
//! let (_, files) = groups.sorted().next().unwrap();
//! assert_eq!(files[0].path.to_str(), Some("tmp/a.txt"));
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::scanner::FileRecord;

/// Minimum group size for a set of files to count as duplicates.
pub const MIN_GROUP_SIZE: usize = 2;

/// Identity key used to bucket candidate duplicates: `name + "_" + size`.
///
/// Ordering is plain lexicographic order of the rendered string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GroupKey(String);

impl GroupKey {
    /// Build the key for a file with the given name and size.
    #[must_use]
    pub fn new(name: &str, size: u64) -> Self {
        Self(format!("{}_{}", name, size))
    }

    /// Build the key for a record.
    #[must_use]
    pub fn of(record: &FileRecord) -> Self {
        Self::new(&record.name, record.size)
    }

    /// The rendered key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mapping from [`GroupKey`] to the files sharing it.
///
/// Insertion order within a group is whatever order the scan tasks
/// delivered files in; call [`retain_duplicates`](Self::retain_duplicates)
/// before relying on member order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileGroups {
    groups: HashMap<GroupKey, Vec<FileRecord>>,
}

impl FileGroups {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the group for its key.
    pub fn insert(&mut self, record: FileRecord) {
        self.groups
            .entry(GroupKey::of(&record))
            .or_default()
            .push(record);
    }

    /// Drop groups with fewer than [`MIN_GROUP_SIZE`] members and sort the
    /// rest by ascending path length.
    ///
    /// The sort is stable, so members with equal path lengths keep their
    /// relative order.
    pub fn retain_duplicates(&mut self) {
        self.groups.retain(|_, files| files.len() >= MIN_GROUP_SIZE);
        for files in self.groups.values_mut() {
            files.sort_by_key(FileRecord::path_len);
        }
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Members of the group for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &GroupKey) -> Option<&[FileRecord]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Iterate groups in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &[FileRecord])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Iterate groups ordered by ascending key.
    pub fn sorted(&self) -> impl Iterator<Item = (&GroupKey, &[FileRecord])> {
        let mut keys: Vec<&GroupKey> = self.groups.keys().collect();
        keys.sort();
        keys.into_iter().map(|k| (k, self.groups[k].as_slice()))
    }

    /// Total number of files across all groups.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Number of files that cleanup would remove (all but one per group).
    #[must_use]
    pub fn redundant_count(&self) -> usize {
        self.groups
            .values()
            .map(|files| files.len().saturating_sub(1))
            .sum()
    }

    /// Bytes that cleanup would free.
    #[must_use]
    pub fn reclaimable_bytes(&self) -> u64 {
        self.groups
            .values()
            .flat_map(|files| files.iter().skip(1))
            .map(|f| f.size)
            .sum()
    }
}

impl FromIterator<FileRecord> for FileGroups {
    fn from_iter<I: IntoIterator<Item = FileRecord>>(iter: I) -> Self {
        let mut groups = Self::new();
        for record in iter {
            groups.insert(record);
        }
        groups
    }
}
