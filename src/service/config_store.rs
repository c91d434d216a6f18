// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered JSON configuration store.
//!
//! This module provides [`ConfigStore`], which loads JSON fragments from a base
//! directory plus environment overlay subdirectories and serves dotted key path
//! reads and writes over the merged result.

use crate::adapters::{JsonParser, LocalFileSystem};
use crate::domain::json_tree::{lookup, merge, set_at_path};
use crate::domain::{
    ConfigError, ConfigurationService, Environment, KeyPath, RejectReason, Rejected, Result,
    SetOutcome,
};
use crate::ports::{ConfigFileSystem, ConfigParser};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::{Component, Path, PathBuf};

/// Fragment files per group name, in the order they must be applied.
type FileGroups = BTreeMap<String, Vec<PathBuf>>;

/// Configuration store keyed by group name.
///
/// Each group holds one JSON tree, usually loaded from the file of the same name.
/// The store is a plain owned value without internal locking; wrap it in a
/// `Mutex` or `RwLock` to share it between threads.
///
/// # Directory layout
///
/// ```text
/// config/
///   database.json          # base fragment for group "database"
///   production/
///     database.json        # overlay, merged on top of the base fragment
/// ```
///
/// # Examples
///
/// ```rust
/// use layercfg::prelude::*;
/// use serde_json::json;
///
/// let mut store = ConfigStore::new();
/// let _ = store.set(&KeyPath::from("database"), json!({"host": "localhost"}));
/// let _ = store.set(&KeyPath::from("database.port"), json!(5432));
///
/// assert_eq!(store.get(&KeyPath::from("database.port")), Some(&json!(5432)));
/// assert!(!store.has(&KeyPath::from("database.user")));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigStore {
    repository: HashMap<String, Value>,
}

impl ConfigStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from an initial group mapping.
    pub fn with_repository(repository: HashMap<String, Value>) -> Self {
        Self { repository }
    }

    /// Creates a builder for constructing a store.
    pub fn builder() -> ConfigStoreBuilder {
        ConfigStoreBuilder::new()
    }

    /// Loads `.json` fragments from `path` and its environment overlays.
    ///
    /// Fragments in `path` are applied first, then those in `path/<environment>`
    /// for each environment in the order given. Overlay directories that do not
    /// exist are skipped, as are names that would leave `path` (absolute names,
    /// `..` components). Within a group, later fragments are merged on top of
    /// earlier ones, so nested objects accumulate keys while scalars and arrays
    /// from the last fragment win.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if a directory or file cannot be read and
    /// [`ConfigError::ParseError`] if a fragment is malformed. Loading stops at the
    /// first failure; groups merged before it stay in the store.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use layercfg::prelude::*;
    ///
    /// # fn main() -> layercfg::domain::Result<()> {
    /// let mut store = ConfigStore::new();
    /// store.populate("config", ["staging", "production"])?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn populate<P, I, S>(&mut self, path: P, environments: I) -> Result<()>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.populate_with(&LocalFileSystem::new(), &JsonParser::new(), path, environments)
    }

    /// Loads fragments like [`populate`](Self::populate), through the given
    /// file system and parser.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use layercfg::prelude::*;
    /// use layercfg::adapters::{JsonParser, MemoryFileSystem};
    /// use serde_json::json;
    ///
    /// # fn main() -> layercfg::domain::Result<()> {
    /// let fs = MemoryFileSystem::new()
    ///     .with_file("config/db.json", r#"{"host": "localhost", "pool": {"size": 5}}"#)
    ///     .with_file("config/production/db.json", r#"{"host": "prod", "pool": {"timeout": 30}}"#);
    ///
    /// let mut store = ConfigStore::new();
    /// store.populate_with(&fs, &JsonParser::new(), "config", ["production"])?;
    ///
    /// assert_eq!(store.get(&KeyPath::from("db.host")), Some(&json!("prod")));
    /// assert_eq!(store.get(&KeyPath::from("db.pool.size")), Some(&json!(5)));
    /// # Ok(())
    /// # }
    /// ```
    pub fn populate_with<F, R, P, I, S>(
        &mut self,
        fs: &F,
        parser: &R,
        path: P,
        environments: I,
    ) -> Result<()>
    where
        F: ConfigFileSystem + ?Sized,
        R: ConfigParser + ?Sized,
        P: AsRef<Path>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let base = path.as_ref();
        let mut groups = FileGroups::new();

        collect_fragments(fs, parser, base, &mut groups)?;

        for environment in environments {
            let Some(overlay) = overlay_dir(base, environment.as_ref()) else {
                tracing::warn!(
                    "Skipping environment '{}': not a directory name under '{}'",
                    environment.as_ref(),
                    base.display()
                );
                continue;
            };
            if fs.exists(&overlay) {
                collect_fragments(fs, parser, &overlay, &mut groups)?;
            } else {
                tracing::debug!(
                    "Skipping missing overlay directory '{}'",
                    overlay.display()
                );
            }
        }

        for (group, files) in groups {
            for file in files {
                let content = fs.read_bytes(&file)?;
                let fragment = parser.parse(&content).map_err(|e| match e {
                    ConfigError::ParseError { message, source } => ConfigError::ParseError {
                        message: format!("{} ({})", message, file.display()),
                        source,
                    },
                    other => other,
                })?;

                match self.repository.get_mut(&group) {
                    Some(existing) => merge(existing, fragment),
                    None => {
                        self.repository.insert(group.clone(), fragment);
                    }
                }
                tracing::trace!("Applied '{}' to group '{}'", file.display(), group);
            }
        }

        tracing::debug!(
            "Loaded configuration from '{}' ({} groups)",
            base.display(),
            self.repository.len()
        );

        Ok(())
    }

    /// Retrieves the value at `key` deserialized into `T`.
    ///
    /// Returns `Ok(None)` when nothing is stored at `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use layercfg::prelude::*;
    /// use serde_json::json;
    ///
    /// let mut store = ConfigStore::new();
    /// let _ = store.set(&KeyPath::from("database"), json!({"port": 5432}));
    ///
    /// let port: Option<u16> = store.get_as(&KeyPath::from("database.port")).unwrap();
    /// assert_eq!(port, Some(5432));
    /// assert!(store.get_as::<String>(&KeyPath::from("database.port")).is_err());
    /// ```
    pub fn get_as<T: DeserializeOwned>(&self, key: &KeyPath) -> Result<Option<T>> {
        self.get(key)
            .map(|value| {
                T::deserialize(value)
                    .map_err(|e| ConfigError::from_serde_json_error::<T>(key.as_str(), e))
            })
            .transpose()
    }

    /// Returns the names of all groups, in no particular order.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.repository.keys().map(String::as_str)
    }

    /// Returns the group mapping.
    pub fn repository(&self) -> &HashMap<String, Value> {
        &self.repository
    }

    /// Consumes the store and returns its group mapping.
    pub fn into_repository(self) -> HashMap<String, Value> {
        self.repository
    }

    /// Removes a group, returning its tree if it existed.
    pub fn remove_group(&mut self, group: &str) -> Option<Value> {
        self.repository.remove(group)
    }

    /// Returns the number of groups.
    pub fn len(&self) -> usize {
        self.repository.len()
    }

    /// Returns `true` if the store holds no groups.
    pub fn is_empty(&self) -> bool {
        self.repository.is_empty()
    }
}

impl From<HashMap<String, Value>> for ConfigStore {
    fn from(repository: HashMap<String, Value>) -> Self {
        Self::with_repository(repository)
    }
}

impl ConfigurationService for ConfigStore {
    fn get(&self, key: &KeyPath) -> Option<&Value> {
        let segments = key.segments();
        let (group, rest) = segments.split_first()?;
        let root = self.repository.get(*group)?;
        lookup(root, rest)
    }

    fn set(&mut self, key: &KeyPath, value: Value) -> SetOutcome {
        let segments = key.segments();
        let Some((group, rest)) = segments.split_first() else {
            tracing::debug!("Ignoring write to an empty key path");
            return SetOutcome::Ignored(RejectReason::EmptyPath);
        };

        if rest.is_empty() {
            self.repository.insert(group.to_string(), value);
            return SetOutcome::Applied;
        }

        // Nested writes never create the group itself.
        let Some(current) = self.repository.remove(*group) else {
            tracing::debug!("Ignoring write to '{}': group '{}' does not exist", key, group);
            return SetOutcome::Ignored(RejectReason::MissingGroup);
        };

        match set_at_path(current, rest, value) {
            Ok(updated) => {
                self.repository.insert(group.to_string(), updated);
                SetOutcome::Applied
            }
            Err(Rejected { root, reason }) => {
                self.repository.insert(group.to_string(), root);
                tracing::debug!("Ignoring write to '{}': {}", key, reason);
                SetOutcome::Ignored(reason)
            }
        }
    }
}

/// Resolves the overlay directory for `environment` inside `base`.
///
/// Returns `None` unless the name is a relative path made only of normal
/// components, so the overlay can never point outside `base`.
fn overlay_dir(base: &Path, environment: &str) -> Option<PathBuf> {
    let mut overlay = base.to_path_buf();
    let mut pushed = false;

    for component in Path::new(environment).components() {
        match component {
            Component::Normal(part) => {
                overlay.push(part);
                pushed = true;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    pushed.then_some(overlay)
}

/// Adds every fragment directly inside `dir` to `groups`.
///
/// Only files whose extension the parser accepts are considered; the group name is
/// the file stem. Files without a UTF-8 stem are skipped.
fn collect_fragments<F, R>(fs: &F, parser: &R, dir: &Path, groups: &mut FileGroups) -> Result<()>
where
    F: ConfigFileSystem + ?Sized,
    R: ConfigParser + ?Sized,
{
    let mut found = 0usize;

    for file in fs.list_files(dir)? {
        let accepted = file
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| parser.accepts_extension(ext));
        if !accepted {
            continue;
        }

        let Some(name) = file.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };

        groups.entry(name.to_string()).or_default().push(file.clone());
        found += 1;
    }

    tracing::debug!("Found {} fragments in '{}'", found, dir.display());
    Ok(())
}

/// Builder for constructing a `ConfigStore`.
///
/// # Examples
///
/// ```rust
/// use layercfg::prelude::*;
/// use layercfg::adapters::MemoryFileSystem;
/// use serde_json::json;
///
/// # fn main() -> layercfg::domain::Result<()> {
/// let fs = MemoryFileSystem::new()
///     .with_file("config/app.json", r#"{"debug": false}"#)
///     .with_file("config/dev/app.json", r#"{"debug": true}"#);
///
/// let store = ConfigStore::builder()
///     .with_directory("config")
///     .with_environment("dev")
///     .build_with(&fs)?;
///
/// assert_eq!(store.get(&KeyPath::from("app.debug")), Some(&json!(true)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigStoreBuilder {
    repository: HashMap<String, Value>,
    directory: Option<PathBuf>,
    environment: Environment,
}

impl ConfigStoreBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with an initial group mapping.
    ///
    /// Loaded fragments are merged on top of these groups.
    pub fn with_repository(mut self, repository: HashMap<String, Value>) -> Self {
        self.repository = repository;
        self
    }

    /// Adds a single seed group.
    pub fn with_group(mut self, group: impl Into<String>, value: Value) -> Self {
        self.repository.insert(group.into(), value);
        self
    }

    /// Sets the base directory to load fragments from.
    pub fn with_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.directory = Some(path.into());
        self
    }

    /// Uses the OS-appropriate configuration directory as the base directory.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use layercfg::service::ConfigStoreBuilder;
    ///
    /// # fn main() -> layercfg::domain::Result<()> {
    /// let store = ConfigStoreBuilder::new()
    ///     .with_default_directory("myapp", "com.example")?
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_default_directory(self, app_name: &str, qualifier: &str) -> Result<Self> {
        let dir = LocalFileSystem::default_config_dir(app_name, qualifier)?;
        Ok(self.with_directory(dir))
    }

    /// Appends an environment overlay.
    pub fn with_environment(mut self, name: impl AsRef<str>) -> Self {
        self.environment.push(name);
        self
    }

    /// Appends several environment overlays, in order.
    pub fn with_environments<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.environment.extend(names);
        self
    }

    /// Appends the overlays named by the given resolver.
    #[cfg(feature = "env")]
    pub fn with_environment_resolver(self, resolver: &crate::adapters::EnvironmentResolver) -> Self {
        let environment = resolver.resolve();
        self.with_environments(environment.names())
    }

    /// Appends the overlays named by the `LAYERCFG_ENV` environment variable.
    #[cfg(feature = "env")]
    pub fn with_environment_from_env(self) -> Self {
        self.with_environment_resolver(&crate::adapters::EnvironmentResolver::new())
    }

    /// Returns the overlays collected so far.
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Builds the store, loading from the local file system.
    pub fn build(self) -> Result<ConfigStore> {
        self.build_with(&LocalFileSystem::new())
    }

    /// Builds the store, loading through the given file system.
    pub fn build_with<F: ConfigFileSystem + ?Sized>(self, fs: &F) -> Result<ConfigStore> {
        let mut store = ConfigStore::with_repository(self.repository);

        if let Some(dir) = &self.directory {
            store.populate_with(fs, &JsonParser::new(), dir, self.environment.names())?;
        }

        Ok(store)
    }
}

/// Plain settings for a [`ConfigStoreBuilder`], e.g. read from a bootstrap file.
///
/// # Examples
///
/// ```rust
/// use layercfg::service::LoadOptions;
///
/// let options: LoadOptions =
///     serde_json::from_str(r#"{"directory": "config", "environments": ["production"]}"#).unwrap();
/// assert_eq!(options.environments, vec!["production".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Base directory holding the fragments
    pub directory: Option<PathBuf>,
    /// Overlay names, in application order
    pub environments: Vec<String>,
}

impl From<LoadOptions> for ConfigStoreBuilder {
    fn from(options: LoadOptions) -> Self {
        let builder = ConfigStoreBuilder::new().with_environments(options.environments);
        match options.directory {
            Some(dir) => builder.with_directory(dir),
            None => builder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryFileSystem;
    use serde_json::json;

    fn key(path: &str) -> KeyPath {
        KeyPath::from(path)
    }

    fn store_with(group: &str, value: Value) -> ConfigStore {
        let mut repository = HashMap::new();
        repository.insert(group.to_string(), value);
        ConfigStore::with_repository(repository)
    }

    fn populate(fs: &MemoryFileSystem, envs: &[&str]) -> (ConfigStore, Result<()>) {
        let mut store = ConfigStore::new();
        let result = store.populate_with(fs, &JsonParser::new(), "cfg", envs);
        (store, result)
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = ConfigStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(!store.has(&key("anything")));
    }

    #[test]
    fn test_empty_key_path() {
        let mut store = store_with("g", json!({"a": 1}));
        let before = store.clone();

        assert_eq!(store.get(&key("")), None);
        assert!(!store.has(&key("")));
        assert_eq!(
            store.set(&key(""), json!(1)),
            SetOutcome::Ignored(RejectReason::EmptyPath)
        );
        assert_eq!(store, before);
    }

    #[test]
    fn test_get_missing_group() {
        let store = store_with("g", json!({"a": 1}));
        assert_eq!(store.get(&key("other")), None);
        assert_eq!(store.get(&key("other.a")), None);
    }

    #[test]
    fn test_set_group_round_trip() {
        let mut store = ConfigStore::new();
        for value in [
            Value::Null,
            json!({}),
            json!({"a": {"b": [1, 2, {"c": null}]}}),
            json!("text"),
            json!(3.5),
        ] {
            assert!(store.set(&key("g"), value.clone()).is_applied());
            assert_eq!(store.get(&key("g")), Some(&value));
        }
    }

    #[test]
    fn test_nested_set_on_existing_group() {
        let mut store = store_with("g", json!({}));
        assert_eq!(store.set(&key("g.a.b"), json!("v")), SetOutcome::Applied);
        assert_eq!(store.get(&key("g.a.b")), Some(&json!("v")));
        assert_eq!(store.get(&key("g")), Some(&json!({"a": {"b": "v"}})));
    }

    #[test]
    fn test_nested_set_does_not_create_group() {
        let mut store = ConfigStore::new();
        assert_eq!(
            store.set(&key("g.a.b"), json!("v")),
            SetOutcome::Ignored(RejectReason::MissingGroup)
        );
        assert_eq!(store.get(&key("g.a.b")), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_nested_set_through_scalar_is_ignored() {
        let mut store = store_with("g", json!({"a": 5}));
        assert_eq!(
            store.set(&key("g.a.b"), json!(1)),
            SetOutcome::Ignored(RejectReason::NotAnObject)
        );
        assert_eq!(store.get(&key("g")), Some(&json!({"a": 5})));
    }

    #[test]
    fn test_nested_set_on_scalar_group_is_ignored() {
        let mut store = store_with("g", json!(true));
        assert_eq!(
            store.set(&key("g.a"), json!(1)),
            SetOutcome::Ignored(RejectReason::NotAnObject)
        );
        assert_eq!(store.get(&key("g")), Some(&json!(true)));
    }

    #[test]
    fn test_get_null_blocks_descent() {
        let store = store_with("g", json!({"a": null}));
        assert_eq!(store.get(&key("g.a")), Some(&Value::Null));
        assert_eq!(store.get(&key("g.a.b")), Some(&Value::Null));
        assert_eq!(store.get(&key("g.a.b.c")), Some(&Value::Null));
        assert!(store.has(&key("g.a.b")));
    }

    #[test]
    fn test_get_null_group_blocks_descent() {
        let store = store_with("g", Value::Null);
        assert_eq!(store.get(&key("g.x")), Some(&Value::Null));
    }

    #[test]
    fn test_get_through_scalar_is_absent() {
        let store = store_with("g", json!({"a": 1, "list": [1, 2]}));
        assert_eq!(store.get(&key("g.a.b")), None);
        assert_eq!(store.get(&key("g.list.0")), None);
        assert!(!store.has(&key("g.a.b")));
    }

    #[test]
    fn test_empty_segment_is_literal_key() {
        let mut store = store_with("g", json!({}));
        assert!(store.set(&key("g..b"), json!(1)).is_applied());
        assert_eq!(store.get(&key("g")), Some(&json!({"": {"b": 1}})));
        assert_eq!(store.get(&key("g..b")), Some(&json!(1)));
    }

    #[test]
    fn test_get_as() {
        let store = store_with("db", json!({"port": 5432, "hosts": ["a", "b"]}));

        assert_eq!(store.get_as::<u16>(&key("db.port")).unwrap(), Some(5432));
        assert_eq!(
            store.get_as::<Vec<String>>(&key("db.hosts")).unwrap(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(store.get_as::<u16>(&key("db.missing")).unwrap(), None);

        let err = store.get_as::<bool>(&key("db.port")).unwrap_err();
        assert!(matches!(err, ConfigError::TypeConversionError { .. }));
        assert!(err.to_string().contains("db.port"));
    }

    #[test]
    fn test_groups_and_remove() {
        let mut store = store_with("a", json!(1));
        let _ = store.set(&key("b"), json!(2));

        let mut groups: Vec<_> = store.groups().collect();
        groups.sort();
        assert_eq!(groups, vec!["a", "b"]);

        assert_eq!(store.remove_group("a"), Some(json!(1)));
        assert_eq!(store.remove_group("a"), None);
        assert_eq!(store.into_repository().len(), 1);
    }

    #[test]
    fn test_populate_layers_overlay() {
        let fs = MemoryFileSystem::new()
            .with_file("cfg/db.json", r#"{"host":"localhost","pool":{"size":5}}"#)
            .with_file(
                "cfg/production/db.json",
                r#"{"host":"prod.example.com","pool":{"timeout":30}}"#,
            );

        let (store, result) = populate(&fs, &["production"]);
        result.unwrap();

        assert_eq!(store.get(&key("db.host")), Some(&json!("prod.example.com")));
        assert_eq!(store.get(&key("db.pool.size")), Some(&json!(5)));
        assert_eq!(store.get(&key("db.pool.timeout")), Some(&json!(30)));
    }

    #[test]
    fn test_populate_last_environment_wins() {
        let fs = MemoryFileSystem::new()
            .with_file("cfg/app.json", r#"{"level":"base","name":"demo"}"#)
            .with_file("cfg/staging/app.json", r#"{"level":"staging"}"#)
            .with_file("cfg/production/app.json", r#"{"level":"production"}"#);

        let (store, result) = populate(&fs, &["staging", "production"]);
        result.unwrap();
        assert_eq!(store.get(&key("app.level")), Some(&json!("production")));
        assert_eq!(store.get(&key("app.name")), Some(&json!("demo")));

        let (store, result) = populate(&fs, &["production", "staging"]);
        result.unwrap();
        assert_eq!(store.get(&key("app.level")), Some(&json!("staging")));
    }

    #[test]
    fn test_populate_overlay_only_group() {
        let fs = MemoryFileSystem::new()
            .with_file("cfg/app.json", "{}")
            .with_file("cfg/production/cache.json", r#"{"ttl":60}"#);

        let (store, result) = populate(&fs, &["production"]);
        result.unwrap();
        assert_eq!(store.get(&key("cache.ttl")), Some(&json!(60)));
    }

    #[test]
    fn test_populate_missing_environment_is_skipped() {
        let fs = MemoryFileSystem::new().with_file("cfg/app.json", r#"{"a":1}"#);

        let (store, result) = populate(&fs, &["staging"]);
        result.unwrap();
        assert_eq!(store.get(&key("app.a")), Some(&json!(1)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_populate_absolute_environment_stays_under_base() {
        let fs = MemoryFileSystem::new()
            .with_file("cfg/db.json", r#"{"host":"base"}"#)
            .with_file("/outside/db.json", r#"{"host":"outside"}"#);

        let (store, result) = populate(&fs, &["/outside"]);
        result.unwrap();
        assert_eq!(store.get(&key("db.host")), Some(&json!("base")));
    }

    #[test]
    fn test_populate_parent_environment_is_skipped() {
        let fs = MemoryFileSystem::new()
            .with_file("cfg/db.json", r#"{"host":"base"}"#)
            .with_file("other/db.json", r#"{"host":"sibling"}"#);

        let (store, result) = populate(&fs, &["../other", "", "."]);
        result.unwrap();
        assert_eq!(store.get(&key("db.host")), Some(&json!("base")));
    }

    #[test]
    fn test_overlay_dir() {
        let base = Path::new("cfg");
        assert_eq!(overlay_dir(base, "production"), Some(PathBuf::from("cfg/production")));
        assert_eq!(overlay_dir(base, "./eu/prod"), Some(PathBuf::from("cfg/eu/prod")));
        assert_eq!(overlay_dir(base, "/etc"), None);
        assert_eq!(overlay_dir(base, "a/../b"), None);
        assert_eq!(overlay_dir(base, ""), None);
    }

    #[test]
    fn test_builder_agrees_with_populate_on_repeated_environments() {
        let fs = MemoryFileSystem::new()
            .with_file("cfg/app.json", r#"{"level":"base"}"#)
            .with_file("cfg/staging/app.json", r#"{"level":"staging"}"#)
            .with_file("cfg/production/app.json", r#"{"level":"production"}"#);
        let envs = ["production", "staging", "production"];

        let (populated, result) = populate(&fs, &envs);
        result.unwrap();

        let built = ConfigStore::builder()
            .with_directory("cfg")
            .with_environments(envs)
            .build_with(&fs)
            .unwrap();

        assert_eq!(built.get(&key("app.level")), Some(&json!("production")));
        assert_eq!(built, populated);
    }

    #[test]
    fn test_populate_ignores_other_files() {
        let fs = MemoryFileSystem::new()
            .with_file("cfg/app.json", r#"{"a":1}"#)
            .with_file("cfg/notes.txt", "not json")
            .with_file("cfg/app.json.bak", "{")
            .with_file("cfg/upper.JSON", "{")
            .with_file("cfg/nested/deep.json", r#"{"x":1}"#);

        let (store, result) = populate(&fs, &[]);
        result.unwrap();

        let groups: Vec<_> = store.groups().collect();
        assert_eq!(groups, vec!["app"]);
    }

    #[test]
    fn test_populate_merges_into_seeded_group() {
        let fs = MemoryFileSystem::new().with_file("cfg/app.json", r#"{"b":2}"#);
        let mut store = store_with("app", json!({"a": 1}));

        store
            .populate_with(&fs, &JsonParser::new(), "cfg", Vec::<String>::new())
            .unwrap();

        assert_eq!(store.get(&key("app")), Some(&json!({"a": 1, "b": 2})));
    }

    #[test]
    fn test_populate_malformed_json_keeps_earlier_groups() {
        let fs = MemoryFileSystem::new()
            .with_file("cfg/a.json", r#"{"ok":true}"#)
            .with_file("cfg/b.json", r#"{"broken":"#)
            .with_file("cfg/c.json", r#"{"late":true}"#);

        let (store, result) = populate(&fs, &[]);

        let err = result.unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("b.json"));
        assert_eq!(store.get(&key("a.ok")), Some(&json!(true)));
        assert!(!store.has(&key("b")));
        assert!(!store.has(&key("c")));
    }

    #[test]
    fn test_populate_missing_base_directory_fails() {
        let fs = MemoryFileSystem::new();
        let (_, result) = populate(&fs, &[]);
        assert!(result.unwrap_err().is_io());
    }

    #[test]
    fn test_populate_unreadable_file_fails() {
        let fs = MemoryFileSystem::new()
            .with_file("cfg/a.json", "{}")
            .with_unreadable("cfg/a.json");
        let (_, result) = populate(&fs, &[]);
        assert!(result.unwrap_err().is_io());
    }

    #[test]
    fn test_populate_unreadable_overlay_fails_before_merging() {
        let fs = MemoryFileSystem::new()
            .with_file("cfg/a.json", "{}")
            .with_file("cfg/production/a.json", "{}")
            .with_unreadable("cfg/production");
        let (store, result) = populate(&fs, &["production"]);
        assert!(result.unwrap_err().is_io());
        assert!(store.is_empty());
    }

    #[test]
    fn test_builder_seeds_and_loads() {
        let fs = MemoryFileSystem::new()
            .with_file("cfg/app.json", r#"{"name":"demo"}"#)
            .with_file("cfg/dev/app.json", r#"{"debug":true}"#);

        let store = ConfigStore::builder()
            .with_group("app", json!({"version": 1}))
            .with_directory("cfg")
            .with_environments(["dev"])
            .build_with(&fs)
            .unwrap();

        assert_eq!(
            store.get(&key("app")),
            Some(&json!({"version": 1, "name": "demo", "debug": true}))
        );
    }

    #[test]
    fn test_builder_without_directory() {
        let fs = MemoryFileSystem::new();
        let store = ConfigStoreBuilder::new()
            .with_group("a", json!(1))
            .build_with(&fs)
            .unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    #[cfg(feature = "env")]
    fn test_builder_with_environment_resolver() {
        use crate::adapters::EnvironmentResolver;

        let mut values = HashMap::new();
        values.insert("APP_ENV".to_string(), "staging,production".to_string());
        let resolver = EnvironmentResolver::with_values(values).variable("APP_ENV");

        let builder = ConfigStoreBuilder::new()
            .with_environment("local")
            .with_environment_resolver(&resolver);

        assert_eq!(
            builder.environment().names(),
            &["local", "staging", "production"]
        );
    }

    #[test]
    fn test_load_options_into_builder() {
        let options: LoadOptions =
            serde_json::from_value(json!({"directory": "cfg", "environments": ["dev"]})).unwrap();
        let fs = MemoryFileSystem::new()
            .with_file("cfg/app.json", r#"{"debug":false}"#)
            .with_file("cfg/dev/app.json", r#"{"debug":true}"#);

        let store = ConfigStoreBuilder::from(options).build_with(&fs).unwrap();
        assert_eq!(store.get(&key("app.debug")), Some(&json!(true)));
    }

    #[test]
    fn test_load_options_defaults() {
        let options: LoadOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, LoadOptions::default());
    }
}
