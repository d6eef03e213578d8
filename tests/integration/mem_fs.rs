//! In-memory file system for deterministic scans.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dupseek::scanner::{DirEntryInfo, FileSystem};

/// Directory tree held in memory, keyed by directory path.
#[derive(Debug, Default)]
pub struct MemFs {
    dirs: Mutex<BTreeMap<PathBuf, Vec<DirEntryInfo>>>,
}

impl MemFs {
    /// Build a tree from `(path, size)` pairs; parent directories are implied.
    pub fn from_files(files: &[(&str, u64)]) -> Self {
        let mut dirs: BTreeMap<PathBuf, Vec<DirEntryInfo>> = BTreeMap::new();
        for (path, size) in files {
            let path = Path::new(path);
            let parent = path.parent().unwrap().to_path_buf();
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            dirs.entry(parent.clone())
                .or_default()
                .push(DirEntryInfo::file(name, *size));

            let mut child = parent;
            while let Some(dir) = child.parent().filter(|p| !p.as_os_str().is_empty()) {
                let name = child.file_name().unwrap().to_string_lossy().into_owned();
                let entries = dirs.entry(dir.to_path_buf()).or_default();
                if !entries.iter().any(|e| e.is_dir && e.name == name) {
                    entries.push(DirEntryInfo::dir(name));
                }
                child = dir.to_path_buf();
            }
        }
        Self {
            dirs: Mutex::new(dirs),
        }
    }

    /// Whether a file exists at `path`.
    pub fn exists(&self, path: &str) -> bool {
        let path = Path::new(path);
        let name = path.file_name().unwrap().to_string_lossy();
        self.dirs
            .lock()
            .unwrap()
            .get(path.parent().unwrap())
            .is_some_and(|entries| entries.iter().any(|e| !e.is_dir && e.name == name))
    }
}

impl FileSystem for MemFs {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>> {
        self.dirs
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("open {}: no such file or directory", path.display()),
                )
            })
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let parent = path.parent().unwrap_or(Path::new(""));
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        let mut dirs = self.dirs.lock().unwrap();
        let entries = dirs
            .get_mut(parent)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        let index = entries
            .iter()
            .position(|e| !e.is_dir && e.name == name)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        entries.remove(index);
        Ok(())
    }
}

/// The reference tree used throughout the scan tests.
pub fn sample_tree() -> MemFs {
    MemFs::from_files(&[
        ("tmp/unique.txt", 32),
        ("tmp/copy1.txt", 28),
        ("tmp/copy2.txt", 28),
        ("tmp/A/copy1.txt", 28),
        ("tmp/B/copy2.txt", 28),
        ("tmp/A/AA/copy1.txt", 28),
        ("tmp/A/AB/copy1.txt", 35),
    ])
}
