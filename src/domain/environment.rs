// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered environment overlay names.

use std::fmt;

/// The ordered list of environments whose overlay directories are applied on
/// top of the base configuration.
///
/// Later environments win over earlier ones on conflicting keys. A repeated
/// name moves to its last position, so it keeps the precedence of its final
/// mention. Blank names are dropped.
///
/// # Examples
///
/// ```
/// use layercfg::domain::Environment;
///
/// let env = Environment::parse("staging, production,,staging");
/// assert_eq!(env.names(), &["production".to_string(), "staging".to_string()]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Environment {
    names: Vec<String>,
}

impl Environment {
    /// Creates an environment with no overlays.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a comma-separated list of environment names.
    pub fn parse(list: &str) -> Self {
        list.split(',').collect()
    }

    /// Appends an environment name, ignoring blanks.
    ///
    /// A name already present is moved to the end.
    pub fn push(&mut self, name: impl AsRef<str>) {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return;
        }
        self.names.retain(|existing| existing != name);
        self.names.push(name.to_string());
    }

    /// Returns the overlay names in application order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns `true` if no overlays are configured.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Environment {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut env = Environment::new();
        for name in iter {
            env.push(name);
        }
        env
    }
}

impl<S: AsRef<str>> Extend<S> for Environment {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.push(name);
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names.join(","))
    }
}
