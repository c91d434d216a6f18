// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON configuration parser adapter.
//!
//! This module provides the parser used for `.json` configuration fragments.

use crate::domain::{ConfigError, Result};
use crate::ports::ConfigParser;
use serde_json::Value;

/// JSON parser implementation.
///
/// Parses a fragment into a `serde_json::Value` tree and accepts files whose
/// extension is exactly `json`.
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::JsonParser;
/// use layercfg::ports::ConfigParser;
///
/// let parser = JsonParser::new();
/// let value = parser.parse(br#"{"database": {"host": "localhost"}}"#).unwrap();
/// assert_eq!(value["database"]["host"], "localhost");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl JsonParser {
    /// Creates a new JSON parser.
    pub fn new() -> Self {
        JsonParser
    }
}

impl ConfigParser for JsonParser {
    fn parse(&self, content: &[u8]) -> Result<Value> {
        serde_json::from_slice(content).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to parse JSON: {}", e),
            source: Some(Box::new(e)),
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}
