// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing collaborator implementations.
//!
//! This module contains concrete implementations of the traits defined in the
//! ports layer: file systems to load fragments from, the JSON parser, and the
//! environment variable resolver for overlay names.

#[cfg(feature = "env")]
pub mod env_var;
pub mod json;
pub mod local_fs;
pub mod memory_fs;

// Re-export adapters based on feature flags
#[cfg(feature = "env")]
pub use env_var::EnvironmentResolver;
pub use json::JsonParser;
pub use local_fs::LocalFileSystem;
pub use memory_fs::MemoryFileSystem;
