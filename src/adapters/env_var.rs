// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable adapter for resolving overlay names.
//!
//! This module reads the list of active environments (e.g. `staging,production`)
//! from an environment variable.

use crate::domain::Environment;
use std::collections::HashMap;
use std::env;

/// The variable consulted when no other name is configured.
pub const DEFAULT_ENV_VAR: &str = "LAYERCFG_ENV";

/// Maximum length for the variable's value (prevents DoS)
const MAX_ENV_VALUE_LEN: usize = 4096;

/// Resolves the active [`Environment`] from an environment variable.
///
/// The variable holds a comma-separated list of environment names, applied in
/// the order given.
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::EnvironmentResolver;
/// use std::collections::HashMap;
///
/// let mut values = HashMap::new();
/// values.insert("APP_ENV".to_string(), "staging,production".to_string());
///
/// let env = EnvironmentResolver::with_values(values)
///     .variable("APP_ENV")
///     .resolve();
/// assert_eq!(env.names(), &["staging".to_string(), "production".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct EnvironmentResolver {
    /// Name of the variable to read
    variable: String,
    /// Pre-populated values used instead of the process environment
    values: Option<HashMap<String, String>>,
}

impl EnvironmentResolver {
    /// Creates a resolver reading [`DEFAULT_ENV_VAR`] from the process environment.
    pub fn new() -> Self {
        Self {
            variable: DEFAULT_ENV_VAR.to_string(),
            values: None,
        }
    }

    /// Creates a resolver with pre-populated values for testing.
    ///
    /// **Note**: This method is primarily intended for testing; it avoids
    /// mutating the process environment.
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self {
            variable: DEFAULT_ENV_VAR.to_string(),
            values: Some(values),
        }
    }

    /// Sets the variable to read.
    pub fn variable(mut self, name: impl Into<String>) -> Self {
        self.variable = name.into();
        self
    }

    /// Returns the variable this resolver reads.
    pub fn variable_name(&self) -> &str {
        &self.variable
    }

    fn lookup(&self) -> Option<String> {
        match &self.values {
            Some(values) => values.get(&self.variable).cloned(),
            None => env::var(&self.variable).ok(),
        }
    }

    /// Resolves the environment.
    ///
    /// An unset, non-unicode or oversized variable yields an empty environment.
    pub fn resolve(&self) -> Environment {
        let Some(raw) = self.lookup() else {
            tracing::debug!("Environment variable '{}' is not set", self.variable);
            return Environment::new();
        };

        if raw.len() > MAX_ENV_VALUE_LEN {
            tracing::warn!(
                "Ignoring oversized environment variable '{}': len={} (max {})",
                self.variable,
                raw.len(),
                MAX_ENV_VALUE_LEN
            );
            return Environment::new();
        }

        let environment = Environment::parse(&raw);
        tracing::debug!(
            "Resolved environments [{}] from '{}'",
            environment,
            self.variable
        );
        environment
    }
}

impl Default for EnvironmentResolver {
    fn default() -> Self {
        Self::new()
    }
}
