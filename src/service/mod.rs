// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the configuration store.
//!
//! This module contains the concrete implementation of the `ConfigurationService`
//! trait, which loads layered fragments and serves key path access over them.

pub mod config_store;

// Re-export commonly used types
pub use config_store::{ConfigStore, ConfigStoreBuilder, LoadOptions};
