// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical configuration tree nodes.
//!
//! A `ConfigNode` is either a scalar leaf or a structured node mapping field names
//! to child nodes. Every value held by the store is a `ConfigNode` built fresh from
//! caller input, so trees never share or alias sub-nodes.

use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Field map of a structured node.
pub type Fields = BTreeMap<String, ConfigNode>;

/// A scalar leaf value.
///
/// # Examples
///
/// ```
/// use treecfg::domain::ScalarValue;
///
/// assert_eq!(ScalarValue::from(5432).to_string(), "5432");
/// assert_eq!(ScalarValue::from("localhost").to_string(), "localhost");
/// assert_eq!(ScalarValue::Null.to_string(), "");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    /// The absence of a value that was nevertheless explicitly written.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    String(String),
}

impl ScalarValue {
    /// Returns a short name for the kind of scalar, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ScalarValue::Null => "null",
            ScalarValue::Bool(_) => "boolean",
            ScalarValue::Integer(_) => "integer",
            ScalarValue::Float(_) => "float",
            ScalarValue::String(_) => "string",
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Null => Ok(()),
            ScalarValue::Bool(b) => write!(f, "{}", b),
            ScalarValue::Integer(i) => write!(f, "{}", i),
            ScalarValue::Float(n) => write!(f, "{}", n),
            ScalarValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<()> for ScalarValue {
    fn from(_: ()) -> Self {
        ScalarValue::Null
    }
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        ScalarValue::Bool(b)
    }
}

impl From<i32> for ScalarValue {
    fn from(i: i32) -> Self {
        ScalarValue::Integer(i64::from(i))
    }
}

impl From<i64> for ScalarValue {
    fn from(i: i64) -> Self {
        ScalarValue::Integer(i)
    }
}

impl From<u32> for ScalarValue {
    fn from(i: u32) -> Self {
        ScalarValue::Integer(i64::from(i))
    }
}

impl From<f64> for ScalarValue {
    fn from(n: f64) -> Self {
        ScalarValue::Float(n)
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        ScalarValue::String(s)
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::String(s.to_string())
    }
}

/// A node of the canonical configuration tree.
///
/// # Examples
///
/// ```
/// use treecfg::domain::ConfigNode;
///
/// let mut db = ConfigNode::empty_struct();
/// if let Some(fields) = db.as_struct_mut() {
///     fields.insert("host".to_string(), ConfigNode::from("localhost"));
/// }
///
/// assert_eq!(db.field("host"), Some(&ConfigNode::from("localhost")));
/// assert_eq!(db.field("host").and_then(ConfigNode::as_str), Some("localhost"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigNode {
    /// A leaf value.
    Scalar(ScalarValue),
    /// A structured node with named children.
    Struct(Fields),
}

impl ConfigNode {
    /// Creates a structured node with no fields.
    pub fn empty_struct() -> Self {
        ConfigNode::Struct(Fields::new())
    }

    /// Returns true for structured nodes.
    pub fn is_struct(&self) -> bool {
        matches!(self, ConfigNode::Struct(_))
    }

    /// Returns true for scalar leaves.
    pub fn is_scalar(&self) -> bool {
        matches!(self, ConfigNode::Scalar(_))
    }

    /// Returns true for the null scalar.
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigNode::Scalar(ScalarValue::Null))
    }

    /// Returns a short name for the kind of node, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigNode::Scalar(scalar) => scalar.kind(),
            ConfigNode::Struct(_) => "struct",
        }
    }

    /// Returns the scalar value of a leaf.
    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            ConfigNode::Scalar(scalar) => Some(scalar),
            ConfigNode::Struct(_) => None,
        }
    }

    /// Returns the fields of a structured node.
    pub fn as_struct(&self) -> Option<&Fields> {
        match self {
            ConfigNode::Struct(fields) => Some(fields),
            ConfigNode::Scalar(_) => None,
        }
    }

    /// Returns the fields of a structured node for mutation.
    pub fn as_struct_mut(&mut self) -> Option<&mut Fields> {
        match self {
            ConfigNode::Struct(fields) => Some(fields),
            ConfigNode::Scalar(_) => None,
        }
    }

    /// Returns the named child of a structured node.
    pub fn field(&self, name: &str) -> Option<&ConfigNode> {
        self.as_struct().and_then(|fields| fields.get(name))
    }

    /// Descends through the given segments.
    ///
    /// ```
    /// use treecfg::domain::{ConfigInput, ConfigNode};
    ///
    /// let input = ConfigInput::map([("db", ConfigInput::map([("port", 5432)]))]);
    /// let node = input.into_node_detached();
    /// assert_eq!(node.lookup(["db", "port"]), Some(&ConfigNode::from(5432)));
    /// assert_eq!(node.lookup(["db", "user"]), None);
    /// ```
    pub fn lookup<'a, I>(&self, segments: I) -> Option<&ConfigNode>
    where
        I: IntoIterator<Item = &'a str>,
    {
        segments
            .into_iter()
            .try_fold(self, |node, segment| node.field(segment))
    }

    /// Returns the string of a string leaf.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigNode::Scalar(ScalarValue::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Converts the node to a boolean.
    ///
    /// Accepts boolean leaves, the integers `0`/`1`, and the strings
    /// `true`/`yes`/`1`/`on` and `false`/`no`/`0`/`off` (case-insensitive).
    ///
    /// ```
    /// use treecfg::domain::ConfigNode;
    ///
    /// assert!(ConfigNode::from(true).as_bool("flag").unwrap());
    /// assert!(ConfigNode::from("Yes").as_bool("flag").unwrap());
    /// assert!(!ConfigNode::from(0).as_bool("flag").unwrap());
    /// ```
    pub fn as_bool(&self, path: &str) -> Result<bool> {
        match self {
            ConfigNode::Scalar(ScalarValue::Bool(b)) => Ok(*b),
            ConfigNode::Scalar(ScalarValue::Integer(0)) => Ok(false),
            ConfigNode::Scalar(ScalarValue::Integer(1)) => Ok(true),
            ConfigNode::Scalar(ScalarValue::String(s)) => match s.to_lowercase().as_str() {
                "true" | "yes" | "1" | "on" => Ok(true),
                "false" | "no" | "0" | "off" => Ok(false),
                _ => s
                    .parse::<bool>()
                    .map_err(|e| conversion_error(path, "boolean", e)),
            },
            other => Err(mismatch(path, "boolean", other)),
        }
    }

    /// Converts the node to an `i64`. String leaves are parsed.
    pub fn as_i64(&self, path: &str) -> Result<i64> {
        match self {
            ConfigNode::Scalar(ScalarValue::Integer(i)) => Ok(*i),
            ConfigNode::Scalar(ScalarValue::String(s)) => s
                .parse::<i64>()
                .map_err(|e| conversion_error(path, "integer", e)),
            other => Err(mismatch(path, "integer", other)),
        }
    }

    /// Converts the node to an `f64`. Integers widen; string leaves are parsed.
    pub fn as_f64(&self, path: &str) -> Result<f64> {
        match self {
            ConfigNode::Scalar(ScalarValue::Float(n)) => Ok(*n),
            ConfigNode::Scalar(ScalarValue::Integer(i)) => Ok(*i as f64),
            ConfigNode::Scalar(ScalarValue::String(s)) => s
                .parse::<f64>()
                .map_err(|e| conversion_error(path, "float", e)),
            other => Err(mismatch(path, "float", other)),
        }
    }

    /// Parses the textual form of a scalar leaf into any `FromStr` type.
    ///
    /// ```
    /// use treecfg::domain::ConfigNode;
    /// use std::net::IpAddr;
    ///
    /// let ip: IpAddr = ConfigNode::from("127.0.0.1").parse("server.bind").unwrap();
    /// assert_eq!(ip.to_string(), "127.0.0.1");
    /// ```
    pub fn parse<T>(&self, path: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match self {
            ConfigNode::Scalar(scalar) => scalar
                .to_string()
                .parse::<T>()
                .map_err(|e| ConfigError::TypeConversionError {
                    path: path.to_string(),
                    target_type: std::any::type_name::<T>().to_string(),
                    source: Box::new(e),
                }),
            other => Err(mismatch(path, std::any::type_name::<T>(), other)),
        }
    }
}

fn mismatch(path: &str, expected: &'static str, found: &ConfigNode) -> ConfigError {
    ConfigError::TypeMismatch {
        path: path.to_string(),
        expected,
        found: found.kind(),
    }
}

fn conversion_error<E>(path: &str, target_type: &str, err: E) -> ConfigError
where
    E: std::error::Error + Send + Sync + 'static,
{
    ConfigError::TypeConversionError {
        path: path.to_string(),
        target_type: target_type.to_string(),
        source: Box::new(err),
    }
}

macro_rules! node_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ConfigNode {
                fn from(value: $ty) -> Self {
                    ConfigNode::Scalar(value.into())
                }
            }
        )*
    };
}

node_from_scalar!((), bool, i32, i64, u32, f64, String, &str);

impl From<ScalarValue> for ConfigNode {
    fn from(scalar: ScalarValue) -> Self {
        ConfigNode::Scalar(scalar)
    }
}

impl From<Fields> for ConfigNode {
    fn from(fields: Fields) -> Self {
        ConfigNode::Struct(fields)
    }
}

/// Conversion from a stored node into a Rust type.
///
/// Used by [`ConfigStore::get_as`](crate::service::ConfigStore::get_as).
pub trait FromNode: Sized {
    /// Converts `node`, read from `path`, into `Self`.
    fn from_node(node: &ConfigNode, path: &str) -> Result<Self>;
}

impl FromNode for ConfigNode {
    fn from_node(node: &ConfigNode, _path: &str) -> Result<Self> {
        Ok(node.clone())
    }
}

impl FromNode for String {
    fn from_node(node: &ConfigNode, path: &str) -> Result<Self> {
        match node {
            ConfigNode::Scalar(scalar) => Ok(scalar.to_string()),
            other => Err(mismatch(path, "string", other)),
        }
    }
}

impl FromNode for bool {
    fn from_node(node: &ConfigNode, path: &str) -> Result<Self> {
        node.as_bool(path)
    }
}

impl FromNode for i64 {
    fn from_node(node: &ConfigNode, path: &str) -> Result<Self> {
        node.as_i64(path)
    }
}

impl FromNode for f64 {
    fn from_node(node: &ConfigNode, path: &str) -> Result<Self> {
        node.as_f64(path)
    }
}

macro_rules! from_node_via_i64 {
    ($($ty:ty),*) => {
        $(
            impl FromNode for $ty {
                fn from_node(node: &ConfigNode, path: &str) -> Result<Self> {
                    let value = node.as_i64(path)?;
                    <$ty>::try_from(value).map_err(|e| conversion_error(path, stringify!($ty), e))
                }
            }
        )*
    };
}

from_node_via_i64!(i32, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    fn db_node() -> ConfigNode {
        let mut fields = Fields::new();
        fields.insert("host".to_string(), ConfigNode::from("localhost"));
        fields.insert("port".to_string(), ConfigNode::from(5432));
        ConfigNode::Struct(fields)
    }

    #[test]
    fn test_kind() {
        assert_eq!(ConfigNode::from(()).kind(), "null");
        assert_eq!(ConfigNode::from(true).kind(), "boolean");
        assert_eq!(ConfigNode::from(1).kind(), "integer");
        assert_eq!(ConfigNode::from(1.5).kind(), "float");
        assert_eq!(ConfigNode::from("x").kind(), "string");
        assert_eq!(ConfigNode::empty_struct().kind(), "struct");
    }

    #[test]
    fn test_field_and_lookup() {
        let node = db_node();
        assert_eq!(node.field("host"), Some(&ConfigNode::from("localhost")));
        assert_eq!(node.field("missing"), None);
        assert_eq!(node.lookup(["port"]), Some(&ConfigNode::from(5432)));
        assert_eq!(node.lookup(["port", "deeper"]), None);
        assert_eq!(node.lookup(std::iter::empty::<&str>()), Some(&node));
    }

    #[test]
    fn test_scalar_has_no_fields() {
        let node = ConfigNode::from("leaf");
        assert!(node.as_struct().is_none());
        assert!(node.field("anything").is_none());
    }

    #[test]
    fn test_as_bool_string_variants() {
        for val in ["true", "True", "YES", "1", "on"] {
            assert!(ConfigNode::from(val).as_bool("k").unwrap(), "{}", val);
        }
        for val in ["false", "FALSE", "no", "0", "Off"] {
            assert!(!ConfigNode::from(val).as_bool("k").unwrap(), "{}", val);
        }
    }

    #[test]
    fn test_as_bool_invalid() {
        assert!(matches!(
            ConfigNode::from("maybe").as_bool("k"),
            Err(ConfigError::TypeConversionError { .. })
        ));
        assert!(matches!(
            ConfigNode::from(7).as_bool("k"),
            Err(ConfigError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_as_i64() {
        assert_eq!(ConfigNode::from(42).as_i64("k").unwrap(), 42);
        assert_eq!(ConfigNode::from("-42").as_i64("k").unwrap(), -42);
        assert!(ConfigNode::from("3.14").as_i64("k").is_err());
        assert!(ConfigNode::from(3.14).as_i64("k").is_err());
    }

    #[test]
    fn test_as_i64_on_struct_is_mismatch() {
        let err = db_node().as_i64("db").unwrap_err();
        match err {
            ConfigError::TypeMismatch {
                path,
                expected,
                found,
            } => {
                assert_eq!(path, "db");
                assert_eq!(expected, "integer");
                assert_eq!(found, "struct");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(ConfigNode::from(2.5).as_f64("k").unwrap(), 2.5);
        assert_eq!(ConfigNode::from(2).as_f64("k").unwrap(), 2.0);
        assert_eq!(ConfigNode::from("-3.25").as_f64("k").unwrap(), -3.25);
        assert!(ConfigNode::from(false).as_f64("k").is_err());
    }

    #[test]
    fn test_from_node_narrowing() {
        assert_eq!(u16::from_node(&ConfigNode::from(8080), "port").unwrap(), 8080);
        assert!(u16::from_node(&ConfigNode::from(70000), "port").is_err());
        assert!(u32::from_node(&ConfigNode::from(-1), "port").is_err());
    }

    #[test]
    fn test_from_node_string() {
        assert_eq!(String::from_node(&ConfigNode::from(42), "k").unwrap(), "42");
        assert!(String::from_node(&db_node(), "k").is_err());
    }

    #[test]
    fn test_parse_on_struct_fails() {
        let result: Result<std::net::IpAddr> = db_node().parse("db");
        assert!(result.is_err());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = db_node();
        let mut copy = original.clone();
        copy.as_struct_mut()
            .unwrap()
            .insert("user".to_string(), ConfigNode::from("admin"));

        assert!(original.field("user").is_none());
        assert!(copy.field("user").is_some());
    }
}
