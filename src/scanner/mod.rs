//! Scanner module for directory traversal.
//!
//! This module provides functionality for:
//! - A [`FileSystem`] seam so the scan and deletion phases can run against
//!   the real disk ([`OsFileSystem`]) or an in-memory tree in tests
//! - Concurrent directory walking with one task per subdirectory
//!   (see [`walker`])
//!
//! # Example
//!
//! ```no_run
//! use dupseek::scanner::{walker::scan_tree, OsFileSystem};
//! use std::path::Path;
//!
//! let groups = scan_tree(&OsFileSystem, Path::new("."), 0);
//! println!("Found {} files", groups.file_count());
//! ```

pub mod walker;

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// One observed regular file.
///
/// Records are created during the scan and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FileRecord {
    /// File name (last path component)
    pub name: String,
    /// Path as discovered, joined onto the cleaned scan root
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl FileRecord {
    /// Create a new FileRecord.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            size,
        }
    }

    /// Length of the path in bytes, used to pick the canonical file.
    #[must_use]
    pub fn path_len(&self) -> usize {
        self.path.as_os_str().len()
    }
}

/// A single child of a directory as reported by a [`FileSystem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    /// Entry name (no directory part)
    pub name: String,
    /// Whether the entry is a directory
    pub is_dir: bool,
    /// Size in bytes (meaningless for directories)
    pub size: u64,
}

impl DirEntryInfo {
    /// Describe a regular file.
    #[must_use]
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
            size,
        }
    }

    /// Describe a directory.
    #[must_use]
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
            size: 0,
        }
    }
}

/// Directory listing and file removal.
///
/// Implementations must be shareable across the scan's worker threads.
pub trait FileSystem: Send + Sync {
    /// List the direct children of `path`.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>>;

    /// Remove the file at `path`.
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>> {
        Ok(collect_entries(path, fs::read_dir(path)?, describe_entry))
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

/// Describe one `std::fs` entry; `None` for entries that are not reported.
fn describe_entry(entry: fs::DirEntry) -> io::Result<Option<DirEntryInfo>> {
    let name = entry.file_name().to_string_lossy().into_owned();

    // Symlinks are neither followed nor reported.
    let file_type = entry.file_type()?;
    if file_type.is_dir() {
        Ok(Some(DirEntryInfo::dir(name)))
    } else if file_type.is_file() {
        let size = entry.metadata()?.len();
        Ok(Some(DirEntryInfo::file(name, size)))
    } else {
        log::trace!("Skipping non-regular entry: {}", entry.path().display());
        Ok(None)
    }
}

/// Describe every entry of a listing of `dir`.
///
/// An entry that fails to read or describe (e.g. a file removed between
/// listing and stat) is logged and skipped; its siblings are kept.
fn collect_entries<I, T, D>(dir: &Path, entries: I, mut describe: D) -> Vec<DirEntryInfo>
where
    I: IntoIterator<Item = io::Result<T>>,
    D: FnMut(T) -> io::Result<Option<DirEntryInfo>>,
{
    let mut infos = Vec::new();
    for entry in entries {
        match entry.and_then(&mut describe) {
            Ok(Some(info)) => infos.push(info),
            Ok(None) => {}
            Err(e) => log::warn!("Skipping unreadable entry in {}: {}", dir.display(), e),
        }
    }
    infos
}

/// Errors that can occur during directory scanning.
///
/// The scan itself never aborts on these; they are logged and the
/// affected subtree is skipped.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when reading a directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The directory was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// Any other I/O error while reading a directory.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Classify an I/O error raised while reading `path`.
    #[must_use]
    pub fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

/// Lexically clean a scan root.
///
/// `.` components are dropped and `..` pops a preceding normal component,
/// so `./tmp` becomes `tmp` and `tmp/A/../B` becomes `tmp/B`. An empty
/// result is `.`.
#[must_use]
pub fn clean_root(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(
                    cleaned.components().next_back(),
                    Some(Component::Normal(_))
                ) && cleaned.pop();
                if !popped && !cleaned.has_root() {
                    cleaned.push("..");
                }
            }
            other => cleaned.push(other.as_os_str()),
        }
    }

    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}
