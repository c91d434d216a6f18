// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) for the collaborators a
//! configuration store depends on. These traits are implemented by adapters in
//! the adapters layer.

pub mod file_system;
pub mod parser;

// Re-export commonly used types
pub use file_system::ConfigFileSystem;
pub use parser::ConfigParser;
