// SPDX-License-Identifier: MIT OR Apache-2.0

//! Caller-facing input for configuration writes.
//!
//! `ConfigInput` is what callers hand to `set`. It may be a scalar, a nested
//! map or list, an already canonical `ConfigNode`, or a provider that produces
//! the value lazily. The store turns every input into a fresh `ConfigNode` tree
//! before it touches its index.

use crate::domain::config_node::{ConfigNode, Fields, ScalarValue};
use crate::ports::ConfigReader;
use std::fmt;

/// A deferred value, invoked once at write time with a read view of the store.
pub type Provider = Box<dyn FnOnce(&dyn ConfigReader) -> ConfigInput + Send>;

/// Input accepted by configuration writes.
///
/// # Examples
///
/// ```
/// use treecfg::domain::{ConfigInput, ConfigNode};
///
/// let input = ConfigInput::map([
///     ("host", ConfigInput::from("localhost")),
///     ("ports", ConfigInput::list([8080, 8081])),
/// ]);
/// assert!(input.is_structured());
///
/// let node = input.into_node_detached();
/// assert_eq!(node.lookup(["ports", "1"]), Some(&ConfigNode::from(8081)));
/// ```
pub enum ConfigInput {
    /// A scalar leaf.
    Scalar(ScalarValue),
    /// Named fields, converted into a structured node.
    Map(Vec<(String, ConfigInput)>),
    /// Positional items, converted into a structured node keyed by index.
    List(Vec<ConfigInput>),
    /// An already canonical node.
    Node(ConfigNode),
    /// A lazily evaluated value.
    Provider(Provider),
}

impl ConfigInput {
    /// Builds a map input from `(field, value)` pairs.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<ConfigInput>,
        I: IntoIterator<Item = (K, V)>,
    {
        ConfigInput::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds a list input.
    pub fn list<V, I>(items: I) -> Self
    where
        V: Into<ConfigInput>,
        I: IntoIterator<Item = V>,
    {
        ConfigInput::List(items.into_iter().map(Into::into).collect())
    }

    /// Wraps a closure as a provider.
    ///
    /// ```
    /// use treecfg::domain::ConfigInput;
    /// use treecfg::service::ConfigStore;
    ///
    /// let mut store = ConfigStore::new();
    /// store.set("app.workers", 4);
    /// store.set(
    ///     "app.threads",
    ///     ConfigInput::provider(|config| {
    ///         let workers = config.get("app.workers").and_then(|n| n.as_i64("app.workers").ok());
    ///         workers.unwrap_or(1) * 2
    ///     }),
    /// );
    /// assert_eq!(store.get_as::<i64>("app.threads").unwrap(), Some(8));
    /// ```
    pub fn provider<F, T>(f: F) -> Self
    where
        F: FnOnce(&dyn ConfigReader) -> T + Send + 'static,
        T: Into<ConfigInput>,
    {
        ConfigInput::Provider(Box::new(move |reader: &dyn ConfigReader| f(reader).into()))
    }

    /// Returns true for inputs that canonicalize into a structured node.
    ///
    /// Providers are not structured until resolved.
    pub fn is_structured(&self) -> bool {
        match self {
            ConfigInput::Map(_) | ConfigInput::List(_) => true,
            ConfigInput::Node(node) => node.is_struct(),
            ConfigInput::Scalar(_) | ConfigInput::Provider(_) => false,
        }
    }

    /// Returns true for unresolved providers.
    pub fn is_provider(&self) -> bool {
        matches!(self, ConfigInput::Provider(_))
    }

    /// Invokes providers until a concrete input remains.
    ///
    /// Each provider in the chain runs exactly once.
    pub fn resolve(self, reader: &dyn ConfigReader) -> ConfigInput {
        let mut input = self;
        while let ConfigInput::Provider(provider) = input {
            input = provider(reader);
        }
        input
    }

    /// Canonicalizes the input into a fresh node tree.
    ///
    /// Maps become structured nodes, lists become structured nodes keyed by
    /// element index, and nested providers are resolved against `reader`.
    /// When a map repeats a field, the last value wins.
    pub fn into_node(self, reader: &dyn ConfigReader) -> ConfigNode {
        match self.resolve(reader) {
            ConfigInput::Scalar(scalar) => ConfigNode::Scalar(scalar),
            ConfigInput::Node(node) => node,
            ConfigInput::Map(entries) => ConfigNode::Struct(
                entries
                    .into_iter()
                    .map(|(field, value)| (field, value.into_node(reader)))
                    .collect::<Fields>(),
            ),
            ConfigInput::List(items) => ConfigNode::Struct(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, value)| (index.to_string(), value.into_node(reader)))
                    .collect::<Fields>(),
            ),
            ConfigInput::Provider(provider) => provider(reader).into_node(reader),
        }
    }

    /// Canonicalizes the input without a store; providers see an empty view.
    pub fn into_node_detached(self) -> ConfigNode {
        self.into_node(&Detached)
    }
}

/// A reader over nothing, for canonicalizing outside a store.
struct Detached;

impl ConfigReader for Detached {
    fn get(&self, _path: &str) -> Option<&ConfigNode> {
        None
    }

    fn has(&self, _path: &str) -> bool {
        false
    }
}

impl fmt::Debug for ConfigInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigInput::Scalar(scalar) => f.debug_tuple("Scalar").field(scalar).finish(),
            ConfigInput::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            ConfigInput::List(items) => f.debug_tuple("List").field(items).finish(),
            ConfigInput::Node(node) => f.debug_tuple("Node").field(node).finish(),
            ConfigInput::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

macro_rules! input_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ConfigInput {
                fn from(value: $ty) -> Self {
                    ConfigInput::Scalar(value.into())
                }
            }
        )*
    };
}

input_from_scalar!((), bool, i32, i64, u32, f64, String, &str);

impl From<ScalarValue> for ConfigInput {
    fn from(scalar: ScalarValue) -> Self {
        ConfigInput::Scalar(scalar)
    }
}

impl From<ConfigNode> for ConfigInput {
    fn from(node: ConfigNode) -> Self {
        ConfigInput::Node(node)
    }
}

impl From<Fields> for ConfigInput {
    fn from(fields: Fields) -> Self {
        ConfigInput::Node(ConfigNode::Struct(fields))
    }
}

impl<T> From<Vec<T>> for ConfigInput
where
    T: Into<ConfigInput>,
{
    fn from(items: Vec<T>) -> Self {
        ConfigInput::list(items)
    }
}
