// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory file system adapter.
//!
//! Useful for embedding configuration in a binary and for tests that should not
//! touch the disk.

use crate::domain::{ConfigError, Result};
use crate::ports::ConfigFileSystem;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

/// File system adapter holding its files in memory.
///
/// Directories exist implicitly as ancestors of stored files, or explicitly via
/// [`with_dir`](MemoryFileSystem::with_dir). Individual paths can be marked
/// unreadable to simulate I/O failures.
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::MemoryFileSystem;
/// use layercfg::ports::ConfigFileSystem;
/// use std::path::Path;
///
/// let fs = MemoryFileSystem::new()
///     .with_file("config/db.json", r#"{"host":"localhost"}"#)
///     .with_file("config/production/db.json", r#"{"host":"prod"}"#);
///
/// let files = fs.list_files(Path::new("config")).unwrap();
/// assert_eq!(files, vec![Path::new("config/db.json").to_path_buf()]);
/// assert!(fs.exists(Path::new("config/production")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    unreadable: BTreeSet<PathBuf>,
}

impl MemoryFileSystem {
    /// Creates an empty in-memory file system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given content.
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl AsRef<[u8]>) -> Self {
        self.insert_file(path, content);
        self
    }

    /// Adds an empty directory.
    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.dirs.insert(path.into());
        self
    }

    /// Marks a file or directory as unreadable.
    pub fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
        self.unreadable.insert(path.into());
        self
    }

    /// Adds or replaces a file.
    pub fn insert_file(&mut self, path: impl Into<PathBuf>, content: impl AsRef<[u8]>) {
        self.files.insert(path.into(), content.as_ref().to_vec());
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.iter().any(|dir| dir.starts_with(path))
            || self
                .files
                .keys()
                .any(|file| file != path && file.starts_with(path))
    }

    fn check_readable(&self, path: &Path) -> Result<()> {
        if self.unreadable.contains(path) {
            return Err(ConfigError::io(
                path,
                io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
            ));
        }
        Ok(())
    }
}

impl ConfigFileSystem for MemoryFileSystem {
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        self.check_readable(dir)?;
        if !self.is_dir(dir) {
            return Err(ConfigError::io(
                dir,
                io::Error::new(io::ErrorKind::NotFound, "no such directory"),
            ));
        }

        Ok(self
            .files
            .keys()
            .filter(|file| file.parent() == Some(dir))
            .cloned()
            .collect())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.is_dir(path)
    }

    fn read_bytes(&self, file: &Path) -> Result<Vec<u8>> {
        self.check_readable(file)?;
        self.files.get(file).cloned().ok_or_else(|| {
            ConfigError::io(file, io::Error::new(io::ErrorKind::NotFound, "no such file"))
        })
    }
}
