// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration repository trait definitions.
//!
//! `ConfigReader` is the read-only view handed to providers while a write is in
//! progress. `ConfigRepository` adds the write and file-copy operations that the
//! store exposes to the rest of an application.

use crate::domain::{ConfigInput, ConfigNode, Result};
use std::path::Path;

/// Read access to a layered configuration tree.
///
/// # Examples
///
/// ```rust
/// use treecfg::domain::ConfigNode;
/// use treecfg::ports::ConfigReader;
///
/// struct Fixed(ConfigNode);
///
/// impl ConfigReader for Fixed {
///     fn get(&self, path: &str) -> Option<&ConfigNode> {
///         (path == "answer").then_some(&self.0)
///     }
///
///     fn has(&self, path: &str) -> bool {
///         path == "answer"
///     }
/// }
///
/// let reader = Fixed(ConfigNode::from(42));
/// assert_eq!(reader.get("answer"), Some(&ConfigNode::from(42)));
/// assert!(reader.get("question").is_none());
/// ```
pub trait ConfigReader {
    /// Returns the node at `path`, preferring explicitly set values over defaults.
    ///
    /// Absence is not an error; `None` is returned.
    fn get(&self, path: &str) -> Option<&ConfigNode>;

    /// Returns true when `path` was explicitly set.
    ///
    /// Defaults are deliberately ignored, so `has` may be false while `get`
    /// still returns a value.
    fn has(&self, path: &str) -> bool;
}

/// The full read/write configuration interface.
///
/// # Examples
///
/// ```rust
/// use treecfg::ports::{ConfigReader, ConfigRepository};
/// use treecfg::service::ConfigStore;
///
/// fn configure<R: ConfigRepository>(repo: &mut R) {
///     repo.set_original("server.port", 8080.into())
///         .set("server.host", "0.0.0.0".into());
/// }
///
/// let mut store = ConfigStore::new();
/// configure(&mut store);
/// assert!(store.has("server.host"));
/// assert!(!store.has("server.port"));
/// assert!(ConfigReader::get(&store, "server.port").is_some());
/// ```
pub trait ConfigRepository: ConfigReader {
    /// Writes `value` at `path` in the active layer.
    fn set(&mut self, path: &str, value: ConfigInput) -> &mut Self
    where
        Self: Sized;

    /// Writes `value` at `path` in the original (default) layer.
    fn set_original(&mut self, path: &str, value: ConfigInput) -> &mut Self
    where
        Self: Sized;

    /// Copies a configuration file on disk.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` when `from` does not exist.
    fn copy(&self, from: &Path, to: &Path) -> Result<bool>;
}
