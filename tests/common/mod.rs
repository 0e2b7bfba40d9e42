// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for integration tests.

use treecfg::domain::{ConfigInput, ConfigNode};
use treecfg::service::{ConfigStore, Layer};

/// A small application configuration tree.
#[allow(dead_code)]
pub fn app_defaults() -> ConfigInput {
    ConfigInput::map([
        ("name", ConfigInput::from("orders")),
        (
            "database",
            ConfigInput::map([
                ("host", ConfigInput::from("localhost")),
                ("port", ConfigInput::from(5432)),
                ("pool", ConfigInput::map([("min", 1), ("max", 8)])),
            ]),
        ),
        ("features", ConfigInput::list(["audit", "metrics"])),
    ])
}

/// A store with `app_defaults` written to the original layer under `app`.
#[allow(dead_code)]
pub fn seeded_store() -> ConfigStore {
    let mut store = ConfigStore::new();
    store.set_original("app", app_defaults());
    store
}

/// Asserts that every structured entry in `layer` has an entry for each of its
/// fields, equal to the field's node.
#[allow(dead_code)]
pub fn assert_flattened(store: &ConfigStore, layer: Layer) {
    for path in store.paths(layer) {
        if let Some(ConfigNode::Struct(fields)) = store.get_in(layer, path) {
            for (field, child) in fields {
                let child_path = format!("{}.{}", path, field);
                assert_eq!(
                    store.get_in(layer, &child_path),
                    Some(child),
                    "entry for {} does not match its parent",
                    child_path
                );
            }
        }
    }
}
