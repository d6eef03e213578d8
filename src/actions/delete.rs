//! Duplicate removal.
//!
//! # Overview
//!
//! [`remove_duplicates`] deletes every member of every group except the
//! first (canonical) one. Each group is handled by its own task inside a
//! [`rayon::scope`]; groups proceed independently and a failed deletion is
//! logged and recorded without stopping the others.
//!
//! # Safety
//!
//! The first member of a group is never touched, so at least one copy of
//! every duplicate set survives.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use crate::duplicates::FileGroups;
use crate::scanner::{FileRecord, FileSystem};

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have been deleted or moved).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    /// Classify an I/O error raised while removing `path`.
    #[must_use]
    pub fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) | Self::Io { path: p, .. } => p,
        }
    }
}

/// Outcome of a removal pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalSummary {
    /// Paths that were removed.
    pub removed: Vec<PathBuf>,
    /// Paths that could not be removed, with the error message.
    pub failures: Vec<(PathBuf, String)>,
    /// Total bytes freed.
    pub bytes_freed: u64,
}

impl RemovalSummary {
    /// Number of successful deletions.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.removed.len()
    }

    /// Number of failed deletions.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Check if all deletions succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        let freed = bytesize::ByteSize::b(self.bytes_freed);
        if self.all_succeeded() {
            format!("Deleted {} file(s), freed {}", self.success_count(), freed)
        } else {
            format!(
                "Deleted {} file(s), {} failed, freed {}",
                self.success_count(),
                self.failure_count(),
                freed
            )
        }
    }

    fn merge(&mut self, other: RemovalSummary) {
        self.removed.extend(other.removed);
        self.failures.extend(other.failures);
        self.bytes_freed += other.bytes_freed;
    }
}

/// Remove all but the first file of a single group.
pub fn remove_group_duplicates<F>(fs: &F, files: &[FileRecord]) -> RemovalSummary
where
    F: FileSystem + ?Sized,
{
    let mut summary = RemovalSummary::default();

    for file in files.iter().skip(1) {
        log::info!("Removing file {}", file.path.display());
        match fs.remove_file(&file.path) {
            Ok(()) => {
                summary.bytes_freed += file.size;
                summary.removed.push(file.path.clone());
            }
            Err(e) => {
                let err = DeleteError::from_io(&file.path, e);
                log::error!("Failed to remove {}: {}", file.path.display(), err);
                summary.failures.push((err.path().to_path_buf(), err.to_string()));
            }
        }
    }

    summary
}

/// Remove all but the first file of every group, one task per group.
///
/// Never fails as a whole; per-file failures are in the returned summary.
pub fn remove_duplicates<F>(fs: &F, groups: &FileGroups) -> RemovalSummary
where
    F: FileSystem + ?Sized,
{
    let total = Mutex::new(RemovalSummary::default());

    rayon::scope(|scope| {
        for (key, files) in groups.iter() {
            let total = &total;
            scope.spawn(move |_| {
                log::debug!("Removing duplicates of {}", key);
                let summary = remove_group_duplicates(fs, files);
                total
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .merge(summary);
            });
        }
    });

    total.into_inner().unwrap_or_else(PoisonError::into_inner)
}
