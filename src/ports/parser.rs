// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, which turns the raw bytes of a
//! configuration fragment into a JSON value tree.

use crate::domain::Result;
use serde_json::Value;

/// A trait for parsing configuration fragments.
///
/// The parser also decides which files a directory scan picks up: a file is a
/// configuration fragment when its extension is exactly one of
/// [`supported_extensions`](ConfigParser::supported_extensions).
///
/// # Examples
///
/// ```rust
/// use layercfg::ports::ConfigParser;
/// use layercfg::domain::Result;
/// use serde_json::Value;
///
/// struct RawStringParser;
///
/// impl ConfigParser for RawStringParser {
///     fn parse(&self, content: &[u8]) -> Result<Value> {
///         Ok(Value::String(String::from_utf8_lossy(content).into_owned()))
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["txt"]
///     }
/// }
///
/// let parser = RawStringParser;
/// assert_eq!(parser.parse(b"hello").unwrap(), Value::from("hello"));
/// assert!(parser.accepts_extension("txt"));
/// assert!(!parser.accepts_extension("TXT"));
/// ```
pub trait ConfigParser {
    /// Parses the raw content of a configuration fragment.
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The parsed fragment
    /// * `Err(ConfigError::ParseError)` - The content is malformed
    fn parse(&self, content: &[u8]) -> Result<Value>;

    /// Returns the file extensions (without the leading dot) this parser handles.
    fn supported_extensions(&self) -> &[&str];

    /// Returns `true` if `extension` exactly matches a supported extension.
    fn accepts_extension(&self, extension: &str) -> bool {
        self.supported_extensions().contains(&extension)
    }
}
