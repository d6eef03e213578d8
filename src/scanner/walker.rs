//! Concurrent directory walker.
//!
//! # Overview
//!
//! [`scan_tree`] walks a directory tree by spawning one task per
//! subdirectory into a [`rayon::scope`]. The scope acts as the wait group:
//! it only returns once every task, including the tasks spawned by tasks,
//! has finished.
//!
//! Every discovered file is bucketed into a single shared [`FileGroups`]
//! guarded by one [`Mutex`]. The lock is held for exactly one insertion and
//! never while spawning children or reading a directory.
//!
//! # Depth
//!
//! The root is level 1. With `max_depth <= 0` the walk is unbounded;
//! otherwise a subdirectory found at level `n` is only entered when
//! `n < max_depth`, so `max_depth == 1` lists the root's files only.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::{clean_root, FileRecord, FileSystem, ScanError};
use crate::duplicates::FileGroups;

/// Walk `root` and bucket every regular file by name and size.
///
/// Unreadable directories are logged and skipped. The returned groups are
/// unfiltered: singletons are still present and members are in discovery
/// order.
pub fn scan_tree<F>(fs: &F, root: &Path, max_depth: i64) -> FileGroups
where
    F: FileSystem + ?Sized,
{
    let root = clean_root(root);
    let groups = Mutex::new(FileGroups::new());

    log::debug!(
        "Walker: scanning {} (max depth {})",
        root.display(),
        max_depth
    );

    rayon::scope(|scope| {
        scope.spawn(|scope| scan_dir(scope, fs, &groups, root, max_depth, 1));
    });

    groups.into_inner().unwrap_or_else(PoisonError::into_inner)
}

/// Whether a subdirectory discovered at `level` should be entered.
#[must_use]
pub fn should_descend(max_depth: i64, level: i64) -> bool {
    max_depth <= 0 || level < max_depth
}

fn scan_dir<'scope, F>(
    scope: &rayon::Scope<'scope>,
    fs: &'scope F,
    groups: &'scope Mutex<FileGroups>,
    dir: PathBuf,
    max_depth: i64,
    level: i64,
) where
    F: FileSystem + ?Sized,
{
    log::debug!("Start scanning dir {}", dir.display());

    let entries = match fs.read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            let err = ScanError::from_io(&dir, e);
            log::error!("Can't read dir {}: {}", dir.display(), err);
            return;
        }
    };

    for entry in entries {
        let path = dir.join(&entry.name);

        if entry.is_dir {
            if should_descend(max_depth, level) {
                scope.spawn(move |scope| scan_dir(scope, fs, groups, path, max_depth, level + 1));
            } else {
                log::trace!("Depth limit reached, skipping {}", path.display());
            }
            continue;
        }

        let record = FileRecord::new(entry.name, path, entry.size);
        groups
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(record);
    }
}
