// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration service trait definition.
//!
//! This module defines the `ConfigurationService` trait, the key path interface
//! shared by every configuration store. It provides methods for reading values,
//! checking for their presence, and writing them back.

use crate::domain::json_tree::RejectReason;
use crate::domain::KeyPath;
use serde_json::Value;

/// The result of a key path write.
///
/// Writes never fail with an error. A write that cannot be applied leaves the
/// store untouched and reports why.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum SetOutcome {
    /// The value was stored.
    Applied,
    /// The store was left unchanged.
    Ignored(RejectReason),
}

impl SetOutcome {
    /// Returns `true` if the value was stored.
    pub fn is_applied(&self) -> bool {
        matches!(self, SetOutcome::Applied)
    }
}

/// The main configuration service trait.
///
/// # Examples
///
/// ```rust
/// use layercfg::domain::{ConfigurationService, KeyPath, SetOutcome};
/// use serde_json::Value;
///
/// struct Single(Option<Value>);
///
/// impl ConfigurationService for Single {
///     fn get(&self, key: &KeyPath) -> Option<&Value> {
///         self.0.as_ref().filter(|_| key.as_str() == "only")
///     }
///
///     fn set(&mut self, key: &KeyPath, value: Value) -> SetOutcome {
///         self.0 = Some(value);
///         SetOutcome::Applied
///     }
/// }
///
/// let mut service = Single(None);
/// assert!(!service.has(&KeyPath::from("only")));
/// let _ = service.set(&KeyPath::from("only"), Value::Null);
/// assert!(service.has(&KeyPath::from("only")));
/// ```
pub trait ConfigurationService {
    /// Retrieves the value at the given key path.
    ///
    /// Returns `None` when the path is empty, the group is missing, or descent hits
    /// a missing key or a non-object. A `null` reached while segments remain is
    /// returned as `Some(&Value::Null)`.
    fn get(&self, key: &KeyPath) -> Option<&Value>;

    /// Stores `value` at the given key path.
    fn set(&mut self, key: &KeyPath, value: Value) -> SetOutcome;

    /// Checks if a value is present at the given key path.
    ///
    /// An explicit `null` counts as present.
    fn has(&self, key: &KeyPath) -> bool {
        self.get(key).is_some()
    }
}
