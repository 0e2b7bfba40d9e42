// SPDX-License-Identifier: MIT OR Apache-2.0

//! Thread-safe handle over a [`ConfigStore`].

use crate::domain::{ConfigInput, ConfigNode};
use crate::service::store::ConfigStore;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A cloneable handle to one store shared between components.
///
/// Every clone sees the same store. Pass the handle to whatever needs
/// configuration instead of reaching for a global.
///
/// Providers run while the write lock is held. A provider must read through the
/// view it is given and never through a `SharedConfig`, or the write deadlocks.
///
/// # Examples
///
/// ```rust
/// use treecfg::domain::ConfigInput;
/// use treecfg::service::{ConfigStore, SharedConfig};
///
/// let config = SharedConfig::new(ConfigStore::new());
/// let worker_view = config.clone();
///
/// config.set_original("pool", ConfigInput::map([("size", 4)]));
/// config.set("pool.size", 16);
///
/// assert_eq!(worker_view.store().get_as::<i64>("pool.size").unwrap(), Some(16));
/// assert!(worker_view.has("pool.size"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<ConfigStore>>,
}

impl SharedConfig {
    /// Wraps a store.
    pub fn new(store: ConfigStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Acquires read access to the store.
    pub fn store(&self) -> RwLockReadGuard<'_, ConfigStore> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquires write access to the store.
    pub fn store_mut(&self) -> RwLockWriteGuard<'_, ConfigStore> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the node at `path`.
    pub fn config(&self, path: impl AsRef<str>) -> Option<ConfigNode> {
        self.store().get(path).cloned()
    }

    /// Returns true when `path` is present in the active layer.
    pub fn has(&self, path: impl AsRef<str>) -> bool {
        self.store().has(path)
    }

    /// Writes to the active layer.
    pub fn set(&self, path: impl AsRef<str>, value: impl Into<ConfigInput>) -> &Self {
        self.store_mut().set(path, value);
        self
    }

    /// Writes to the original layer.
    pub fn set_original(&self, path: impl AsRef<str>, value: impl Into<ConfigInput>) -> &Self {
        self.store_mut().set_original(path, value);
        self
    }
}

impl From<ConfigStore> for SharedConfig {
    fn from(store: ConfigStore) -> Self {
        Self::new(store)
    }
}
