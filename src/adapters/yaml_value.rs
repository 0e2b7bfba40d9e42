// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML document conversion.
//!
//! Turns parsed `serde_yaml` documents into [`ConfigInput`] so they can be
//! written into a store like any other structured value.

use crate::domain::{ConfigError, ConfigInput, Result, ScalarValue};
use serde_yaml::Value;

impl From<Value> for ConfigInput {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ConfigInput::Scalar(ScalarValue::Null),
            Value::Bool(b) => ConfigInput::Scalar(ScalarValue::Bool(b)),
            Value::Number(n) => ConfigInput::Scalar(number(&n)),
            Value::String(s) => ConfigInput::Scalar(ScalarValue::String(s)),
            Value::Sequence(items) => ConfigInput::List(items.into_iter().map(Into::into).collect()),
            Value::Mapping(map) => ConfigInput::Map(
                map.into_iter()
                    .filter_map(|(key, value)| mapping_key(key).map(|key| (key, value.into())))
                    .collect(),
            ),
            Value::Tagged(tagged) => tagged.value.into(),
        }
    }
}

/// Parses a YAML document into an input.
///
/// # Errors
///
/// Returns `ConfigError::ParseError` for malformed YAML.
///
/// # Examples
///
/// ```rust
/// use treecfg::adapters::yaml_value::parse_yaml;
/// use treecfg::service::ConfigStore;
///
/// let mut store = ConfigStore::new();
/// store.set_original("server", parse_yaml("host: 0.0.0.0\nport: 8080").unwrap());
/// assert_eq!(store.get_as::<u16>("server.port").unwrap(), Some(8080));
/// ```
pub fn parse_yaml(content: &str) -> Result<ConfigInput> {
    let value: Value = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
        message: format!("Invalid YAML: {}", e),
        source: Some(Box::new(e)),
    })?;
    Ok(value.into())
}

fn number(n: &serde_yaml::Number) -> ScalarValue {
    if let Some(i) = n.as_i64() {
        ScalarValue::Integer(i)
    } else {
        // u64 beyond i64 and real floats
        ScalarValue::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn mapping_key(key: Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => {
            tracing::trace!(key = ?other, "skipping non-scalar YAML mapping key");
            None
        }
    }
}
