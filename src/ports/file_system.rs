// SPDX-License-Identifier: MIT OR Apache-2.0

//! File system trait definition.
//!
//! This module defines the `ConfigFileSystem` trait, the narrow set of file system
//! primitives a configuration store needs to discover and read its fragments.

use crate::domain::Result;
use std::path::{Path, PathBuf};

/// A trait for the file system a configuration store loads from.
///
/// Implementations are expected to report failures as
/// [`ConfigError::IoError`](crate::domain::ConfigError::IoError) carrying the
/// offending path.
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::MemoryFileSystem;
/// use layercfg::ports::ConfigFileSystem;
/// use std::path::Path;
///
/// let fs = MemoryFileSystem::new().with_file("config/app.json", r#"{"name":"demo"}"#);
///
/// assert!(fs.exists(Path::new("config")));
/// assert_eq!(fs.list_files(Path::new("config")).unwrap().len(), 1);
/// ```
pub trait ConfigFileSystem {
    /// Lists the regular files directly inside `dir`.
    ///
    /// Subdirectories are not returned and not descended into. The returned paths
    /// are sorted so that scans are deterministic.
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>>;

    /// Returns `true` if `path` exists.
    fn exists(&self, path: &Path) -> bool;

    /// Reads the full content of `file`.
    fn read_bytes(&self, file: &Path) -> Result<Vec<u8>>;
}
