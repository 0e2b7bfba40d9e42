// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tree surgery used by the store's write path.

use crate::domain::ConfigNode;
use std::collections::HashMap;

/// Deletes the field named by the last of `segments`, descending from `level`.
///
/// Descends only through fields that exist; a missing intermediate leaves the
/// node untouched.
pub(crate) fn remove_recursive<'n, S>(
    node: &'n mut ConfigNode,
    segments: &[S],
    level: usize,
) -> &'n mut ConfigNode
where
    S: AsRef<str>,
{
    if level >= segments.len() {
        return node;
    }

    if let Some(fields) = node.as_struct_mut() {
        let key = segments[level].as_ref();
        if level == segments.len() - 1 {
            fields.remove(key);
        } else if let Some(child) = fields.get_mut(key) {
            remove_recursive(child, segments, level + 1);
        }
    }

    node
}

/// Assigns `value` at the field named by the last of `segments`, creating empty
/// structured nodes for missing intermediates.
///
/// A scalar met on the way down is replaced by an empty structured node. With no
/// segments left, `value` replaces `node` itself.
pub(crate) fn add_recursive<S>(
    node: &mut ConfigNode,
    segments: &[S],
    value: ConfigNode,
    level: usize,
) where
    S: AsRef<str>,
{
    if level >= segments.len() {
        *node = value;
        return;
    }

    if !node.is_struct() {
        *node = ConfigNode::empty_struct();
    }

    if let ConfigNode::Struct(fields) = node {
        let key = segments[level].as_ref().to_string();
        if level == segments.len() - 1 {
            fields.insert(key, value);
        } else {
            let child = fields.entry(key).or_insert_with(ConfigNode::empty_struct);
            add_recursive(child, segments, value, level + 1);
        }
    }
}

/// Inserts an entry for `path` and for every sub-path reachable through `node`.
pub(crate) fn flatten_into(
    path: String,
    node: &ConfigNode,
    entries: &mut HashMap<String, ConfigNode>,
) {
    if let ConfigNode::Struct(fields) = node {
        for (field, child) in fields {
            flatten_into(format!("{}.{}", path, field), child, entries);
        }
    }
    entries.insert(path, node.clone());
}
