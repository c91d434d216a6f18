// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local file system adapter.
//!
//! This module provides the `std::fs` backed implementation of
//! [`ConfigFileSystem`], plus lookup of the OS-appropriate configuration directory.

use crate::domain::{ConfigError, Result};
use crate::ports::ConfigFileSystem;
use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Maximum allowed size for a single configuration fragment (10MB)
const MAX_CONFIG_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// File system adapter backed by the local disk.
///
/// # Examples
///
/// ```rust,no_run
/// use layercfg::adapters::LocalFileSystem;
/// use layercfg::ports::ConfigFileSystem;
/// use std::path::Path;
///
/// let fs = LocalFileSystem::new();
/// let files = fs.list_files(Path::new("/etc/myapp")).unwrap();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Creates a new local file system adapter.
    pub fn new() -> Self {
        LocalFileSystem
    }

    /// Returns the OS-appropriate configuration directory for an application.
    ///
    /// This method uses the `directories` crate, e.g. `~/.config/myapp` on Linux.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "myapp")
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    pub fn default_config_dir(app_name: &str, qualifier: &str) -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| ConfigError::SourceError {
                source_name: "local-fs".to_string(),
                message: "Failed to determine project directories".to_string(),
                source: None,
            })?;

        Ok(proj_dirs.config_dir().to_path_buf())
    }
}

impl ConfigFileSystem for LocalFileSystem {
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(dir).map_err(|e| ConfigError::io(dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| ConfigError::io(dir, e))?.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();

        Ok(files)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_bytes(&self, file: &Path) -> Result<Vec<u8>> {
        // Check file size before reading
        let metadata = fs::metadata(file).map_err(|e| ConfigError::io(file, e))?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::io(
                file,
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "Configuration file too large: {} bytes (max {} bytes)",
                        metadata.len(),
                        MAX_CONFIG_FILE_SIZE
                    ),
                ),
            ));
        }

        fs::read(file).map_err(|e| ConfigError::io(file, e))
    }
}
