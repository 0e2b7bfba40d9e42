// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dotted configuration path newtype.
//!
//! This module provides the `ConfigPath` type, a newtype wrapper around `String`
//! that names a location in the configuration tree, e.g. `"db.connections.default"`.
//! Paths are never validated: empty paths and empty segments are legal.

use std::fmt;

/// A dot-separated path into the configuration tree.
///
/// # Examples
///
/// ```
/// use treecfg::domain::ConfigPath;
///
/// let path = ConfigPath::from("database.host");
/// assert_eq!(path.as_str(), "database.host");
/// assert_eq!(path.first_segment(), "database");
/// assert_eq!(path.segments().collect::<Vec<_>>(), vec!["database", "host"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigPath(String);

impl ConfigPath {
    /// Creates a new `ConfigPath` from a `String`.
    pub fn new(path: String) -> Self {
        ConfigPath(path)
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `ConfigPath` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Iterates over the dot-separated segments of the path.
    ///
    /// An empty path yields a single empty segment.
    pub fn segments(&self) -> std::str::Split<'_, char> {
        self.0.split('.')
    }

    /// Returns the number of segments in the path.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Returns the first segment of the path.
    ///
    /// ```
    /// use treecfg::domain::ConfigPath;
    ///
    /// assert_eq!(ConfigPath::from("app").first_segment(), "app");
    /// assert_eq!(ConfigPath::from("app.name").first_segment(), "app");
    /// ```
    pub fn first_segment(&self) -> &str {
        self.0.split('.').next().unwrap_or_default()
    }

    /// Returns the path of the named field beneath this path.
    ///
    /// ```
    /// use treecfg::domain::ConfigPath;
    ///
    /// let path = ConfigPath::from("db").child("host");
    /// assert_eq!(path.as_str(), "db.host");
    /// ```
    pub fn child(&self, field: &str) -> ConfigPath {
        ConfigPath(format!("{}.{}", self.0, field))
    }

    /// Returns true when `self` is a strict ancestor of `other` by whole segments.
    ///
    /// ```
    /// use treecfg::domain::ConfigPath;
    ///
    /// let db = ConfigPath::from("db");
    /// assert!(db.is_ancestor_of(&ConfigPath::from("db.host")));
    /// assert!(!db.is_ancestor_of(&ConfigPath::from("database.host")));
    /// assert!(!db.is_ancestor_of(&ConfigPath::from("db")));
    /// ```
    pub fn is_ancestor_of(&self, other: &ConfigPath) -> bool {
        other
            .0
            .strip_prefix(self.0.as_str())
            .is_some_and(|rest| rest.starts_with('.'))
    }

    /// Returns the segments of `other` that lie beneath `self`, when `self` is a
    /// segment ancestor of `other`.
    pub fn relative_segments<'a>(&self, other: &'a ConfigPath) -> Option<Vec<&'a str>> {
        if !self.is_ancestor_of(other) {
            return None;
        }
        Some(other.0[self.0.len() + 1..].split('.').collect())
    }
}

impl From<String> for ConfigPath {
    fn from(s: String) -> Self {
        ConfigPath(s)
    }
}

impl From<&str> for ConfigPath {
    fn from(s: &str) -> Self {
        ConfigPath(s.to_string())
    }
}

impl From<&ConfigPath> for ConfigPath {
    fn from(path: &ConfigPath) -> Self {
        path.clone()
    }
}

impl From<ConfigPath> for String {
    fn from(path: ConfigPath) -> Self {
        path.0
    }
}

impl AsRef<str> for ConfigPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
