// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core business logic and types.
//!
//! This module contains the key path type, the JSON tree algorithms, and the
//! error types. It is independent of any file system or parser concerns.

pub mod environment;
pub mod errors;
pub mod json_tree;
pub mod key_path;
pub mod service;

// Re-export commonly used types
pub use environment::Environment;
pub use errors::{ConfigError, Result};
pub use json_tree::{RejectReason, Rejected};
pub use key_path::KeyPath;
pub use service::{ConfigurationService, SetOutcome};
