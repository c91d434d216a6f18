// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment-aware layered JSON configuration.
//!
//! This crate loads JSON configuration fragments from a directory tree, merges
//! per-environment overlays on top of the defaults, and exposes dotted key path
//! access (`"database.pool.size"`) into the merged result.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types and algorithms (`KeyPath`, JSON tree merge and
//!   deep assignment, errors)
//! - **Ports**: Trait definitions for collaborators (`ConfigFileSystem`, `ConfigParser`)
//! - **Adapters**: Implementations for the local disk, memory, JSON, and env vars
//! - **Service**: The `ConfigStore` that loads fragments and serves key paths
//!
//! # Layering
//!
//! ```text
//! config/
//!   database.json              {"host": "localhost", "pool": {"size": 5}}
//!   production/
//!     database.json            {"host": "prod.example.com", "pool": {"timeout": 30}}
//! ```
//!
//! Loading `config` with the `production` environment yields
//! `database.host = "prod.example.com"`, `database.pool.size = 5` and
//! `database.pool.timeout = 30`: objects are unioned, and the overlay wins on
//! conflicting keys.
//!
//! # Feature Flags
//!
//! - `env`: Resolve environment names from an environment variable (default)
//! - `cli`: Build the `layercfg` command-line tool (default)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use layercfg::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let store = ConfigStore::builder()
//!     .with_directory("config")
//!     .with_environments(["staging", "production"])
//!     .build()?;
//!
//! if let Some(host) = store.get(&KeyPath::from("database.host")) {
//!     println!("database host: {}", host);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        ConfigError, ConfigurationService, Environment, KeyPath, RejectReason, Result, SetOutcome,
    };
    pub use crate::ports::{ConfigFileSystem, ConfigParser};
    pub use crate::service::{ConfigStore, ConfigStoreBuilder};

    #[cfg(feature = "env")]
    pub use crate::adapters::EnvironmentResolver;
    pub use crate::adapters::{JsonParser, LocalFileSystem};
}
