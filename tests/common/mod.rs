// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpers for building configuration directory trees on disk.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary configuration directory, removed when dropped.
pub struct ConfigDir {
    dir: TempDir,
}

impl ConfigDir {
    /// Creates an empty configuration directory.
    pub fn new() -> Self {
        init_tracing();
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Writes a file relative to the directory, creating parents as needed.
    pub fn with_file(self, relative: &str, content: &str) -> Self {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }

    /// Creates an empty subdirectory.
    pub fn with_dir(self, relative: &str) -> Self {
        fs::create_dir_all(self.dir.path().join(relative)).unwrap();
        self
    }

    /// Returns the directory path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Returns a path inside the directory.
    pub fn join(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }
}

/// Installs a test-friendly tracing subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}
