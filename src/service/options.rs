// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store options.
//!
//! These control how a write decides that an existing entry overlaps the path
//! being written.

use crate::domain::ConfigPath;
use serde::{Deserialize, Serialize};

/// How a write decides whether an existing path is related to the written path.
///
/// `Substring` compares the raw strings, so `"db"` and `"db2.host"` count as
/// related. `Segment` compares whole dot-separated segments and does not.
///
/// Under `Substring` a write at `cache` drops an entry such as `app.cache`.
/// When `app` itself is untouched and still holds the field, the store indexes
/// `app.cache` again from `app`.
///
/// # Examples
///
/// ```
/// use treecfg::service::PathMatching;
///
/// assert!(PathMatching::Substring.is_ancestor("db", "db2.host"));
/// assert!(!PathMatching::Segment.is_ancestor("db", "db2.host"));
/// assert!(PathMatching::Segment.is_ancestor("db", "db.host"));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathMatching {
    /// Textual containment.
    #[default]
    Substring,
    /// Whole-segment prefix.
    Segment,
}

impl PathMatching {
    /// Returns true when `existing` should receive `path`'s value as a graft.
    pub fn is_ancestor(self, existing: &str, path: &str) -> bool {
        match self {
            PathMatching::Substring => existing != path && path.contains(existing),
            PathMatching::Segment => {
                ConfigPath::from(existing).is_ancestor_of(&ConfigPath::from(path))
            }
        }
    }

    /// Returns true when a write at `path` replaces the entry at `existing`.
    pub fn supersedes(self, path: &str, existing: &str) -> bool {
        match self {
            PathMatching::Substring => existing.contains(path),
            PathMatching::Segment => {
                existing == path || ConfigPath::from(path).is_ancestor_of(&ConfigPath::from(existing))
            }
        }
    }

    /// Returns the segments of `path` to graft beneath `existing`.
    ///
    /// Under `Substring`, `"existing."` is stripped from the front of `path` when
    /// present, otherwise from its first occurrence; when it does not occur at all
    /// the whole of `path` is used.
    ///
    /// ```
    /// use treecfg::service::PathMatching;
    ///
    /// let m = PathMatching::Substring;
    /// assert_eq!(m.graft_segments("a", "a.b.c"), vec!["b", "c"]);
    /// assert_eq!(m.graft_segments("a", "a.a.b"), vec!["a", "b"]);
    /// assert_eq!(m.graft_segments("db", "db2.host"), vec!["db2", "host"]);
    /// ```
    pub fn graft_segments(self, existing: &str, path: &str) -> Vec<String> {
        let prefix = format!("{}.", existing);
        let suffix = match self {
            PathMatching::Substring => match path.strip_prefix(prefix.as_str()) {
                Some(rest) => rest.to_string(),
                None => path.replacen(prefix.as_str(), "", 1),
            },
            PathMatching::Segment => path
                .strip_prefix(prefix.as_str())
                .unwrap_or(path)
                .to_string(),
        };
        suffix.split('.').map(str::to_string).collect()
    }
}

/// Options for a [`ConfigStore`](crate::service::ConfigStore).
///
/// ```
/// use treecfg::service::{PathMatching, StoreOptions};
///
/// let options = StoreOptions::default();
/// assert_eq!(options.path_matching, PathMatching::Substring);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOptions {
    /// Relatedness test used when reconciling overlapping writes.
    #[serde(default)]
    pub path_matching: PathMatching,
}

impl StoreOptions {
    /// Sets the path matching policy.
    pub fn with_path_matching(mut self, path_matching: PathMatching) -> Self {
        self.path_matching = path_matching;
        self
    }
}
