// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration store.
//!
//! This module provides `ConfigStore`, which holds two flattened indexes of the
//! configuration tree: the *active* layer with explicitly set values and the
//! *original* layer with defaults. Reads consult the active layer first.

use crate::adapters::file_copy;
use crate::domain::{ConfigInput, ConfigNode, ConfigPath, FromNode, Result};
use crate::ports::{ConfigReader, ConfigRepository};
use crate::service::options::{PathMatching, StoreOptions};
use crate::service::tree;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Selects one of the two layers of a [`ConfigStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Explicitly set values, consulted first.
    Active,
    /// Default values, consulted when the active layer has no entry.
    Original,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Active => f.write_str("active"),
            Layer::Original => f.write_str("original"),
        }
    }
}

/// A configuration tree addressable by dotted paths, with defaults underneath
/// explicit values.
///
/// Every node of every stored tree is indexed under its own path, so
/// `get("db.pool.max")` is a single map lookup. Writes reconcile the index
/// with existing entries that overlap the written path.
///
/// The store does no locking of its own. Wrap it in a
/// [`SharedConfig`](crate::service::SharedConfig) to share it between threads.
///
/// # Examples
///
/// ```rust
/// use treecfg::domain::{ConfigInput, ConfigNode};
/// use treecfg::service::ConfigStore;
///
/// let mut store = ConfigStore::new();
/// store
///     .set_original("db", ConfigInput::map([("host", "localhost"), ("user", "app")]))
///     .set("db.host", "db.internal");
///
/// assert_eq!(store.get("db.host"), Some(&ConfigNode::from("db.internal")));
/// assert_eq!(store.get("db.user"), Some(&ConfigNode::from("app")));
/// assert!(store.has("db.host"));
/// assert!(!store.has("db.user"));
/// assert!(store.get("db.port").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ConfigStore {
    /// Explicitly set values
    active: HashMap<String, ConfigNode>,
    /// Default values
    original: HashMap<String, ConfigNode>,
    options: StoreOptions,
}

impl ConfigStore {
    /// Creates an empty store with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with the given options.
    ///
    /// ```rust
    /// use treecfg::service::{ConfigStore, PathMatching, StoreOptions};
    ///
    /// let store = ConfigStore::with_options(
    ///     StoreOptions::default().with_path_matching(PathMatching::Segment),
    /// );
    /// assert_eq!(store.options().path_matching, PathMatching::Segment);
    /// ```
    pub fn with_options(options: StoreOptions) -> Self {
        Self {
            active: HashMap::new(),
            original: HashMap::new(),
            options,
        }
    }

    /// Creates a new store builder.
    pub fn builder() -> ConfigStoreBuilder {
        ConfigStoreBuilder::new()
    }

    /// Returns the store's options.
    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Returns the node at `path`, from the active layer if present, otherwise
    /// from the original layer.
    pub fn get(&self, path: impl AsRef<str>) -> Option<&ConfigNode> {
        let path = path.as_ref();
        self.active.get(path).or_else(|| self.original.get(path))
    }

    /// Returns the node at `path` in a single layer.
    pub fn get_in(&self, layer: Layer, path: impl AsRef<str>) -> Option<&ConfigNode> {
        self.layer(layer).get(path.as_ref())
    }

    /// Returns the node at `path`, or `default` when neither layer has it.
    ///
    /// ```rust
    /// use treecfg::domain::ConfigNode;
    /// use treecfg::service::ConfigStore;
    ///
    /// let store = ConfigStore::new();
    /// assert_eq!(store.get_or_default("log.level", "info"), ConfigNode::from("info"));
    /// ```
    pub fn get_or_default(
        &self,
        path: impl AsRef<str>,
        default: impl Into<ConfigNode>,
    ) -> ConfigNode {
        self.get(path).cloned().unwrap_or_else(|| default.into())
    }

    /// Reads the node at `path` and converts it.
    ///
    /// Returns `Ok(None)` when the path is absent.
    ///
    /// # Errors
    ///
    /// Returns a conversion error when the stored node does not fit `T`.
    ///
    /// ```rust
    /// use treecfg::service::ConfigStore;
    ///
    /// let mut store = ConfigStore::new();
    /// store.set("server.port", "8080");
    /// assert_eq!(store.get_as::<u16>("server.port").unwrap(), Some(8080));
    /// assert_eq!(store.get_as::<u16>("server.host").unwrap(), None);
    /// ```
    pub fn get_as<T: FromNode>(&self, path: impl AsRef<str>) -> Result<Option<T>> {
        let path = path.as_ref();
        self.get(path)
            .map(|node| T::from_node(node, path))
            .transpose()
    }

    /// Returns true when `path` is present in the active layer.
    ///
    /// Defaults are not considered: a path only known through
    /// [`set_original`](Self::set_original) reports `false` even though
    /// [`get`](Self::get) returns it.
    pub fn has(&self, path: impl AsRef<str>) -> bool {
        self.active.contains_key(path.as_ref())
    }

    /// Writes `value` at `path` in the active layer.
    pub fn set(&mut self, path: impl AsRef<str>, value: impl Into<ConfigInput>) -> &mut Self {
        self.write(Layer::Active, path.as_ref(), value.into())
    }

    /// Writes `value` at `path` in the original layer.
    pub fn set_original(
        &mut self,
        path: impl AsRef<str>,
        value: impl Into<ConfigInput>,
    ) -> &mut Self {
        self.write(Layer::Original, path.as_ref(), value.into())
    }

    /// Returns the sorted paths indexed in a layer.
    pub fn paths(&self, layer: Layer) -> Vec<&str> {
        let mut paths: Vec<&str> = self.layer(layer).keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    /// Returns the number of distinct paths readable through [`get`](Self::get).
    pub fn len(&self) -> usize {
        self.active.len()
            + self
                .original
                .keys()
                .filter(|path| !self.active.contains_key(*path))
                .count()
    }

    /// Returns true when neither layer holds any entry.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.original.is_empty()
    }

    /// Copies a configuration file on disk.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` when `from` does not exist, in which
    /// case `to` is not created.
    pub fn copy(&self, from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<bool> {
        file_copy::copy_file(from.as_ref(), to.as_ref())
    }

    fn layer(&self, layer: Layer) -> &HashMap<String, ConfigNode> {
        match layer {
            Layer::Active => &self.active,
            Layer::Original => &self.original,
        }
    }

    fn layer_mut(&mut self, layer: Layer) -> &mut HashMap<String, ConfigNode> {
        match layer {
            Layer::Active => &mut self.active,
            Layer::Original => &mut self.original,
        }
    }

    /// Shared write path for both layers.
    fn write(&mut self, layer: Layer, path: &str, value: ConfigInput) -> &mut Self {
        let value = if value.is_provider() {
            tracing::trace!(%layer, path, "resolving deferred configuration value");
            value.resolve(&*self)
        } else {
            value
        };

        if value.is_structured() {
            let node = value.into_node(&*self);
            self.write_structured(layer, path, node);
        } else {
            let node = value.into_node(&*self);
            self.write_scalar(layer, path, node);
        }

        self
    }

    /// Reconciles overlapping entries, then indexes `node` and its sub-nodes.
    ///
    /// Every branch the reconciliation changed is re-indexed from its outermost
    /// entry, so entries dropped only because their path text contains `path`
    /// come back when an untouched ancestor still holds them.
    fn write_structured(&mut self, layer: Layer, path: &str, node: ConfigNode) {
        let matching = self.options.path_matching;
        let written = ConfigPath::from(path);
        let entries = self.layer_mut(layer);
        let existing: Vec<String> = entries.keys().cloned().collect();
        let mut roots = Vec::new();
        let mut textual_drops = Vec::new();
        let mut dropped = 0usize;

        for key in existing {
            if matching.is_ancestor(&key, path) {
                let segments = matching.graft_segments(&key, path);
                if let Some(target) = entries.get_mut(&key) {
                    tracing::trace!(%layer, path, ancestor = %key, "grafting into existing entry");
                    tree::remove_recursive(target, &segments, 0);
                    tree::add_recursive(target, &segments, node.clone(), 0);
                    roots.push(key);
                }
            } else if matching.supersedes(path, &key) {
                tracing::trace!(%layer, path, superseded = %key, "dropping superseded entry");
                entries.remove(&key);
                dropped += 1;

                let key = ConfigPath::from(key);
                if key != written && !written.is_ancestor_of(&key) {
                    textual_drops.push(key);
                }
            }
        }

        let grafted = roots.len();
        roots.extend(
            textual_drops
                .iter()
                .filter_map(|key| outermost_entry(entries, key)),
        );
        reindex_roots(entries, roots);

        tree::flatten_into(path.to_string(), &node, entries);

        tracing::debug!(
            %layer,
            path,
            grafted,
            dropped,
            "wrote structured configuration value"
        );
    }

    /// Rebuilds the tree rooted at the first segment of `path` around a scalar
    /// leaf and re-indexes it.
    fn write_scalar(&mut self, layer: Layer, path: &str, leaf: ConfigNode) {
        let config_path = ConfigPath::from(path);
        let root_key = config_path.first_segment().to_string();
        let rest: Vec<&str> = config_path.segments().skip(1).collect();
        let entries = self.layer_mut(layer);

        let root = if rest.is_empty() {
            leaf
        } else {
            let mut root = match entries.get(&root_key) {
                Some(node @ ConfigNode::Struct(_)) => node.clone(),
                _ => placeholder(entries, &root_key),
            };
            tree::add_recursive(&mut root, &rest, leaf, 0);
            root
        };

        let prefix = format!("{}.", root_key);
        entries.retain(|key, _| !key.starts_with(prefix.as_str()));
        tree::flatten_into(root_key, &root, entries);

        tracing::debug!(%layer, path, "wrote scalar configuration value");
    }
}

/// Builds a structured node for `root_key` from entries already indexed beneath
/// it, shallowest first.
fn placeholder(entries: &HashMap<String, ConfigNode>, root_key: &str) -> ConfigNode {
    let root = ConfigPath::from(root_key);
    let mut nested: Vec<(ConfigPath, &ConfigNode)> = entries
        .iter()
        .map(|(key, node)| (ConfigPath::from(key.as_str()), node))
        .filter(|(key, _)| root.is_ancestor_of(key))
        .collect();
    nested.sort_by_key(|(key, _)| key.depth());

    let mut node = ConfigNode::empty_struct();
    for (key, child) in nested {
        if let Some(segments) = root.relative_segments(&key) {
            tree::add_recursive(&mut node, &segments, child.clone(), 0);
        }
    }
    node
}

/// Returns the shortest proper prefix of `key` that still has an entry.
fn outermost_entry(entries: &HashMap<String, ConfigNode>, key: &ConfigPath) -> Option<String> {
    let segments: Vec<&str> = key.segments().collect();
    (1..segments.len())
        .map(|n| segments[..n].join("."))
        .find(|prefix| entries.contains_key(prefix))
}

/// Rebuilds every entry beneath each of `roots` from the root's own node.
///
/// Roots nested under another root are covered by the outer one and skipped.
fn reindex_roots(entries: &mut HashMap<String, ConfigNode>, roots: Vec<String>) {
    let mut roots: Vec<ConfigPath> = roots.into_iter().map(ConfigPath::from).collect();
    roots.sort_by_key(ConfigPath::depth);

    let mut outer: Vec<ConfigPath> = Vec::new();
    for root in roots {
        if !outer
            .iter()
            .any(|kept| kept == &root || kept.is_ancestor_of(&root))
        {
            outer.push(root);
        }
    }

    for root in outer {
        let Some(node) = entries.get(root.as_str()).cloned() else {
            continue;
        };
        let prefix = format!("{}.", root);
        entries.retain(|key, _| !key.starts_with(prefix.as_str()));
        tracing::trace!(root = %root, "re-indexing reconciled branch");
        tree::flatten_into(root.into_string(), &node, entries);
    }
}

impl ConfigReader for ConfigStore {
    fn get(&self, path: &str) -> Option<&ConfigNode> {
        ConfigStore::get(self, path)
    }

    fn has(&self, path: &str) -> bool {
        ConfigStore::has(self, path)
    }
}

impl ConfigRepository for ConfigStore {
    fn set(&mut self, path: &str, value: ConfigInput) -> &mut Self {
        ConfigStore::set(self, path, value)
    }

    fn set_original(&mut self, path: &str, value: ConfigInput) -> &mut Self {
        ConfigStore::set_original(self, path, value)
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<bool> {
        ConfigStore::copy(self, from, to)
    }
}

/// Builder for constructing a `ConfigStore`.
///
/// Defaults are written before explicit values, so providers among the values
/// can read the defaults.
///
/// # Examples
///
/// ```rust
/// use treecfg::domain::ConfigInput;
/// use treecfg::service::{ConfigStore, PathMatching};
///
/// let store = ConfigStore::builder()
///     .path_matching(PathMatching::Segment)
///     .with_default("log", ConfigInput::map([("level", "info"), ("format", "text")]))
///     .with_value("log.level", "debug")
///     .build();
///
/// assert_eq!(store.get("log.level").and_then(|n| n.as_str()), Some("debug"));
/// assert_eq!(store.get("log.format").and_then(|n| n.as_str()), Some("text"));
/// ```
#[derive(Debug, Default)]
pub struct ConfigStoreBuilder {
    options: StoreOptions,
    defaults: Vec<(String, ConfigInput)>,
    values: Vec<(String, ConfigInput)>,
}

impl ConfigStoreBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the store options.
    pub fn with_options(mut self, options: StoreOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the path matching policy.
    pub fn path_matching(mut self, path_matching: PathMatching) -> Self {
        self.options.path_matching = path_matching;
        self
    }

    /// Queues a write to the original layer.
    pub fn with_default(mut self, path: impl Into<String>, value: impl Into<ConfigInput>) -> Self {
        self.defaults.push((path.into(), value.into()));
        self
    }

    /// Queues a write to the active layer.
    pub fn with_value(mut self, path: impl Into<String>, value: impl Into<ConfigInput>) -> Self {
        self.values.push((path.into(), value.into()));
        self
    }

    /// Builds the store, applying queued writes in order.
    pub fn build(self) -> ConfigStore {
        let mut store = ConfigStore::with_options(self.options);
        for (path, value) in self.defaults {
            store.set_original(path, value);
        }
        for (path, value) in self.values {
            store.set(path, value);
        }
        store
    }
}
