//! File access rooted at one directory.
//!
//! A `Disk` is created per root (each source set, the lang directory) and
//! passed where it is needed; paths given to it are relative to its root.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Disk {
    root: PathBuf,
}

impl Disk {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    pub fn path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    /// Read a file, `None` if it does not exist.
    pub fn read(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let full = self.path(path);
        match fs::read(&full) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io(full, e)),
        }
    }

    /// Write a file, creating parent directories as needed.
    pub fn write(&self, path: &str, content: &[u8]) -> Result<()> {
        let full = self.path(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::write(&full, content).map_err(|e| Error::io(full, e))
    }

    /// Every entry below `path` (a directory relative to the root), sorted
    /// by name at each level. Returned paths are relative to the root and
    /// use `/` as separator.
    ///
    /// `keep_dir` is asked for each directory; returning false skips it and
    /// everything beneath.
    pub fn list(&self, path: &str, mut keep_dir: impl FnMut(&str) -> bool) -> Vec<ListEntry> {
        let walker = WalkDir::new(self.path(path))
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                !e.file_type().is_dir() || keep_dir(&relative_path(&self.root, e.path()))
            });

        walker
            .map(|entry| match entry {
                Ok(entry) => ListEntry {
                    path: relative_path(&self.root, entry.path()),
                    kind: if entry.file_type().is_dir() {
                        EntryKind::Dir
                    } else if entry.file_type().is_file() {
                        EntryKind::File
                    } else {
                        EntryKind::Other
                    },
                },
                Err(e) => ListEntry {
                    path: e
                        .path()
                        .map(|p| relative_path(&self.root, p))
                        .unwrap_or_default(),
                    kind: EntryKind::Unreadable(e.to_string()),
                },
            })
            .collect()
    }
}

/// One entry produced by [`Disk::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub path: String,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    /// Symlinks and special files.
    Other,
    Unreadable(String),
}

fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
