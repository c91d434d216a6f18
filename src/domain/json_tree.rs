// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operations on in-memory JSON value trees.
//!
//! This module holds the pure tree algorithms the configuration store is built on:
//!
//! - [`set_at_path`]: copy-on-write deep assignment, building intermediate objects
//! - [`merge`]: recursive object union where the incoming tree wins on conflicts
//! - [`lookup`]: descent by key sequence, stopping at `null`

use serde_json::{Map, Value};
use std::fmt;

/// Why a deep assignment was not applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// The key path had no segments.
    EmptyPath,
    /// A node on the path exists but is not a JSON object.
    NotAnObject,
    /// The top-level group addressed by a nested path does not exist.
    MissingGroup,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::EmptyPath => write!(f, "empty key path"),
            RejectReason::NotAnObject => write!(f, "intermediate value is not an object"),
            RejectReason::MissingGroup => write!(f, "group does not exist"),
        }
    }
}

/// A refused deep assignment.
///
/// Carries the untouched root back to the caller so nothing is lost when the
/// write is dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct Rejected {
    /// The original, unmodified tree.
    pub root: Value,
    /// Why the write was refused.
    pub reason: RejectReason,
}

/// Sets `value` inside `root` at the position addressed by `keys`.
///
/// Missing intermediate keys are filled with empty objects. The write is refused
/// when `keys` is empty or when `root`, or any existing node along the path, is
/// not an object; in that case the original tree comes back inside [`Rejected`].
///
/// # Examples
///
/// ```
/// use layercfg::domain::json_tree::{set_at_path, RejectReason};
/// use serde_json::json;
///
/// let root = json!({"pool": {"size": 5}});
/// let updated = set_at_path(root, &["pool", "timeout"], json!(30)).unwrap();
/// assert_eq!(updated, json!({"pool": {"size": 5, "timeout": 30}}));
///
/// let rejected = set_at_path(json!("scalar"), &["a"], json!(1)).unwrap_err();
/// assert_eq!(rejected.reason, RejectReason::NotAnObject);
/// assert_eq!(rejected.root, json!("scalar"));
/// ```
pub fn set_at_path<S: AsRef<str>>(
    root: Value,
    keys: &[S],
    value: Value,
) -> std::result::Result<Value, Rejected> {
    let Some((first, remaining)) = keys.split_first() else {
        return Err(Rejected {
            root,
            reason: RejectReason::EmptyPath,
        });
    };

    let mut object = match root {
        Value::Object(object) => object,
        other => {
            return Err(Rejected {
                root: other,
                reason: RejectReason::NotAnObject,
            })
        }
    };

    let key = first.as_ref();
    if remaining.is_empty() {
        object.insert(key.to_string(), value);
        return Ok(Value::Object(object));
    }

    let child = object
        .remove(key)
        .unwrap_or_else(|| Value::Object(Map::new()));
    match set_at_path(child, remaining, value) {
        Ok(updated) => {
            object.insert(key.to_string(), updated);
            Ok(Value::Object(object))
        }
        Err(Rejected { root: child, reason }) => {
            object.insert(key.to_string(), child);
            Err(Rejected {
                root: Value::Object(object),
                reason,
            })
        }
    }
}

/// Merges `from` into `into`.
///
/// Objects are unioned recursively with keys from `from` overriding at every level.
/// Any other combination replaces `into` with `from` outright, arrays included.
///
/// # Examples
///
/// ```
/// use layercfg::domain::json_tree::merge;
/// use serde_json::json;
///
/// let mut base = json!({"host": "localhost", "pool": {"size": 5}});
/// merge(&mut base, json!({"host": "prod", "pool": {"timeout": 30}}));
/// assert_eq!(base, json!({"host": "prod", "pool": {"size": 5, "timeout": 30}}));
/// ```
pub fn merge(into: &mut Value, from: Value) {
    match (into, from) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, incoming) in source {
                match target.get_mut(&key) {
                    Some(existing) => merge(existing, incoming),
                    None => {
                        target.insert(key, incoming);
                    }
                }
            }
        }
        (slot, incoming) => *slot = incoming,
    }
}

/// Descends into `root` by `keys`.
///
/// Descent stops as soon as a `null` is reached, which is then returned even if
/// keys remain. Indexing a non-object or a missing key yields `None`.
///
/// # Examples
///
/// ```
/// use layercfg::domain::json_tree::lookup;
/// use serde_json::{json, Value};
///
/// let root = json!({"a": {"b": 1}, "n": null});
/// assert_eq!(lookup(&root, &["a", "b"]), Some(&json!(1)));
/// assert_eq!(lookup(&root, &["n", "deeper"]), Some(&Value::Null));
/// assert_eq!(lookup(&root, &["a", "missing"]), None);
/// ```
pub fn lookup<'a, S: AsRef<str>>(root: &'a Value, keys: &[S]) -> Option<&'a Value> {
    let mut current = root;
    for key in keys {
        match current {
            Value::Null => break,
            Value::Object(object) => current = object.get(key.as_ref())?,
            _ => return None,
        }
    }
    Some(current)
}
