// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dotted key path newtype for addressing values in the configuration tree.
//!
//! A key path such as `"database.pool.size"` addresses a value at arbitrary depth.
//! The first segment names the top-level group (usually one configuration file),
//! the remaining segments are keys into nested JSON objects.

use std::fmt;

/// Splits a dotted key path into its segments.
///
/// The empty string has no segments. Anything else is split naively on `.`, so
/// empty segments are preserved as literal empty keys.
///
/// # Examples
///
/// ```
/// use layercfg::domain::key_path::split_segments;
///
/// assert!(split_segments("").is_empty());
/// assert_eq!(split_segments("database.host"), vec!["database", "host"]);
/// assert_eq!(split_segments("a..b"), vec!["a", "", "b"]);
/// ```
pub fn split_segments(path: &str) -> Vec<&str> {
    if path.is_empty() {
        return Vec::new();
    }
    path.split('.').collect()
}

/// A type-safe wrapper for dotted configuration key paths.
///
/// # Examples
///
/// ```
/// use layercfg::domain::key_path::KeyPath;
///
/// let path = KeyPath::from("database.pool.size");
///
/// assert_eq!(path.group(), Some("database"));
/// assert_eq!(path.rest(), vec!["pool", "size"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyPath(String);

impl KeyPath {
    /// Creates a new `KeyPath` from a `String`.
    pub fn new(path: String) -> Self {
        KeyPath(path)
    }

    /// Returns the key path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `KeyPath` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns every segment of the path, group included.
    pub fn segments(&self) -> Vec<&str> {
        split_segments(&self.0)
    }

    /// Returns `true` if the path has no segments at all.
    pub fn is_empty(&self) -> bool {
        self.segments().is_empty()
    }

    /// Returns the group segment, or `None` for an empty path.
    pub fn group(&self) -> Option<&str> {
        self.segments().first().copied()
    }

    /// Returns the segments after the group.
    pub fn rest(&self) -> Vec<&str> {
        self.segments().into_iter().skip(1).collect()
    }

    /// Returns a new path with `segment` appended.
    ///
    /// # Examples
    ///
    /// ```
    /// use layercfg::domain::key_path::KeyPath;
    ///
    /// let path = KeyPath::from("database").join("host");
    /// assert_eq!(path.as_str(), "database.host");
    /// ```
    pub fn join(&self, segment: &str) -> Self {
        if self.0.is_empty() {
            KeyPath(segment.to_string())
        } else {
            KeyPath(format!("{}.{}", self.0, segment))
        }
    }
}

impl From<String> for KeyPath {
    fn from(s: String) -> Self {
        KeyPath(s)
    }
}

impl From<&str> for KeyPath {
    fn from(s: &str) -> Self {
        KeyPath(s.to_string())
    }
}

impl From<&String> for KeyPath {
    fn from(s: &String) -> Self {
        KeyPath(s.clone())
    }
}

impl From<KeyPath> for String {
    fn from(path: KeyPath) -> Self {
        path.0
    }
}

impl AsRef<str> for KeyPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
