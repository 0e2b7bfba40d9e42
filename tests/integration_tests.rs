// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the configuration store.
//!
//! These tests exercise writes and reads through the public API the way an
//! application would, including overlapping writes and deferred values.

mod common;

use common::{app_defaults, assert_flattened, seeded_store};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use treecfg::domain::{ConfigInput, ConfigNode, ScalarValue};
use treecfg::ports::{ConfigReader, ConfigRepository};
use treecfg::service::{ConfigStore, Layer, PathMatching, SharedConfig};

fn node(input: impl Into<ConfigInput>) -> ConfigNode {
    input.into().into_node_detached()
}

#[test]
fn test_missing_key_is_absent() {
    let store = ConfigStore::new();
    assert!(store.get("nope").is_none());
    assert!(!store.has("nope"));
}

#[test]
fn test_flatten_invariant_after_structured_write() {
    let mut store = ConfigStore::new();
    store.set("app", app_defaults());

    assert_eq!(store.get("app.database.pool.max"), Some(&ConfigNode::from(8)));
    assert_eq!(store.get("app.features.0"), Some(&ConfigNode::from("audit")));
    assert_eq!(
        store.get("app.database.pool"),
        Some(&node(ConfigInput::map([("min", 1), ("max", 8)])))
    );
    assert_flattened(&store, Layer::Active);
}

#[test]
fn test_identical_write_is_idempotent() {
    let mut store = ConfigStore::new();
    store.set("app", app_defaults());
    let paths: Vec<String> = store
        .paths(Layer::Active)
        .into_iter()
        .map(String::from)
        .collect();

    store.set("app", app_defaults());

    assert_eq!(store.get("app"), Some(&node(app_defaults())));
    assert_eq!(store.paths(Layer::Active), paths);
}

#[test]
fn test_ancestor_overwrite() {
    let mut store = ConfigStore::new();
    store.set("a", ConfigInput::map([("b", 1)]));
    store.set("a.b", 2);

    assert_eq!(store.get("a.b"), Some(&ConfigNode::from(2)));
    assert_eq!(store.get("a"), Some(&node(ConfigInput::map([("b", 2)]))));
}

#[test]
fn test_descendant_then_ancestor_overwrite() {
    let mut store = ConfigStore::new();
    store.set("a.b", 1);
    store.set("a", ConfigInput::map([("c", 2)]));

    assert_eq!(store.get("a"), Some(&node(ConfigInput::map([("c", 2)]))));
    assert!(store.get("a.b").is_none());
    assert_eq!(store.get("a.c"), Some(&ConfigNode::from(2)));
}

#[test]
fn test_structured_write_below_existing_tree() {
    let mut store = ConfigStore::new();
    store.set("app", app_defaults());
    store.set(
        "app.database.pool",
        ConfigInput::map([("min", 4), ("max", 64), ("idle", 30)]),
    );

    let app = store.get("app").unwrap();
    assert_eq!(
        app.lookup(["database", "pool", "max"]),
        Some(&ConfigNode::from(64))
    );
    assert_eq!(
        app.lookup(["database", "host"]),
        Some(&ConfigNode::from("localhost"))
    );
    assert_eq!(store.get("app.database.pool.idle"), Some(&ConfigNode::from(30)));
    assert_flattened(&store, Layer::Active);
}

#[test]
fn test_structured_write_drops_old_branch_fields() {
    let mut store = ConfigStore::new();
    store.set("app", app_defaults());
    store.set("app.database", ConfigInput::map([("url", "postgres://db/orders")]));

    assert!(store.get("app.database.host").is_none());
    assert!(store.get("app.database.pool.max").is_none());
    assert!(store
        .get("app")
        .and_then(|n| n.lookup(["database", "host"]))
        .is_none());
    assert_flattened(&store, Layer::Active);
}

#[test]
fn test_scalar_write_deep_in_tree() {
    let mut store = ConfigStore::new();
    store.set("app", app_defaults());
    store.set("app.database.pool.max", 16);

    assert_eq!(store.get("app.database.pool.max"), Some(&ConfigNode::from(16)));
    assert_eq!(store.get("app.database.pool.min"), Some(&ConfigNode::from(1)));
    assert_eq!(
        store.get("app").and_then(|n| n.lookup(["database", "pool", "max"])),
        Some(&ConfigNode::from(16))
    );
    assert_flattened(&store, Layer::Active);
}

#[test]
fn test_scalar_write_replaces_struct() {
    let mut store = ConfigStore::new();
    store.set("app", app_defaults());
    store.set("app.database", "disabled");

    assert_eq!(store.get("app.database"), Some(&ConfigNode::from("disabled")));
    assert!(store.get("app.database.host").is_none());
    assert_flattened(&store, Layer::Active);
}

#[test]
fn test_scalar_write_through_scalar_promotes() {
    let mut store = ConfigStore::new();
    store.set("log", "info");
    store.set("log.level", "debug");

    assert_eq!(store.get("log"), Some(&node(ConfigInput::map([("level", "debug")]))));
}

#[test]
fn test_null_and_float_leaves() {
    let mut store = ConfigStore::new();
    store.set(
        "limits",
        ConfigInput::map([
            ("ratio", ConfigInput::from(0.75)),
            ("cap", ConfigInput::from(())),
        ]),
    );

    assert!(store.get("limits.cap").is_some_and(ConfigNode::is_null));
    assert_eq!(store.get_as::<f64>("limits.ratio").unwrap(), Some(0.75));
}

#[test]
fn test_deferred_value_resolved_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let mut store = ConfigStore::new();
    store.set(
        "y",
        ConfigInput::provider(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            42
        }),
    );

    assert_eq!(store.get("y"), Some(&ConfigNode::from(42)));
    assert_eq!(store.get("y"), Some(&ConfigNode::from(42)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_deferred_value_reads_defaults() {
    let mut store = seeded_store();
    store.set(
        "app.database.url",
        ConfigInput::provider(|config| {
            let host = config
                .get("app.database.host")
                .and_then(ConfigNode::as_str)
                .unwrap_or("unknown");
            let port = config
                .get("app.database.port")
                .and_then(|n| n.as_i64("app.database.port").ok())
                .unwrap_or(0);
            format!("postgres://{}:{}", host, port)
        }),
    );

    assert_eq!(
        store.get_as::<String>("app.database.url").unwrap().as_deref(),
        Some("postgres://localhost:5432")
    );
}

#[test]
fn test_stored_values_are_independent_of_input() {
    let mut fields = treecfg::domain::Fields::new();
    fields.insert("k".to_string(), ConfigNode::from("v"));

    let mut store = ConfigStore::new();
    store.set("m", fields.clone());
    fields.insert("k".to_string(), ConfigNode::from("changed"));

    assert_eq!(store.get("m.k"), Some(&ConfigNode::from("v")));
}

#[test]
fn test_substring_matching_is_textual() {
    let mut store = ConfigStore::new();
    store.set("db", ConfigInput::map([("host", "a")]));
    store.set("db2", ConfigInput::map([("host", "b")]));

    // "db2" contains "db" textually, so "db" receives a graft
    assert_eq!(
        store.get("db").and_then(|n| n.lookup(["db2", "host"])),
        Some(&ConfigNode::from("b"))
    );
    assert_eq!(store.get("db.db2.host"), Some(&ConfigNode::from("b")));
    assert_eq!(store.get("db2.host"), Some(&ConfigNode::from("b")));
    assert_flattened(&store, Layer::Active);
}

#[test]
fn test_substring_drop_keeps_untouched_ancestor_indexed() {
    let mut store = ConfigStore::new();
    store.set("app", ConfigInput::map([("cache", ConfigInput::map([("size", 2)]))]));
    store.set("cache", ConfigInput::map([("ttl", 5)]));

    // "app.cache" contains "cache" and is dropped, but "app" still holds it
    assert_eq!(
        store.get("app.cache"),
        Some(&node(ConfigInput::map([("size", 2)])))
    );
    assert_eq!(store.get("app.cache.size"), Some(&ConfigNode::from(2)));
    assert_eq!(store.get("cache.ttl"), Some(&ConfigNode::from(5)));
    assert_flattened(&store, Layer::Active);
}

#[test]
fn test_segment_matching_keeps_unrelated_paths() {
    let mut store = ConfigStore::builder()
        .path_matching(PathMatching::Segment)
        .build();
    store.set("db", ConfigInput::map([("host", "a")]));
    store.set("db2", ConfigInput::map([("host", "b")]));

    assert_eq!(store.get("db"), Some(&node(ConfigInput::map([("host", "a")]))));
    assert!(store.get("db.db2").is_none());
    assert_eq!(store.get("db2.host"), Some(&ConfigNode::from("b")));
    assert_flattened(&store, Layer::Active);
}

#[test]
fn test_segment_matching_still_reconciles_descendants() {
    let mut store = ConfigStore::builder()
        .path_matching(PathMatching::Segment)
        .build();
    store.set("a", ConfigInput::map([("b", ConfigInput::map([("c", 1)]))]));
    store.set("a.b", ConfigInput::map([("d", 2)]));

    assert!(store.get("a.b.c").is_none());
    assert_eq!(
        store.get("a").and_then(|n| n.lookup(["b", "d"])),
        Some(&ConfigNode::from(2))
    );
    assert_flattened(&store, Layer::Active);
}

#[test]
fn test_repository_trait_object_reads() {
    let mut store = seeded_store();
    ConfigRepository::set(&mut store, "app.name", ConfigInput::from("billing"));

    let reader: &dyn ConfigReader = &store;
    assert_eq!(reader.get("app.name"), Some(&ConfigNode::from("billing")));
    assert!(reader.has("app.name"));
    assert!(!reader.has("app.database.host"));
}

#[test]
fn test_shared_config_across_threads() {
    let config = SharedConfig::new(seeded_store());
    let reader = config.clone();

    std::thread::spawn(move || {
        config.set("app.database.pool.max", 128);
    })
    .join()
    .unwrap();

    assert_eq!(
        reader.config("app.database.pool.max"),
        Some(ConfigNode::Scalar(ScalarValue::Integer(128)))
    );
}

#[test]
#[cfg(feature = "yaml")]
fn test_yaml_document_as_defaults() {
    let mut store = ConfigStore::new();
    store.set_original(
        "server",
        treecfg::adapters::parse_yaml("host: 0.0.0.0\nport: 8080\ntls:\n  enabled: yes\n").unwrap(),
    );
    store.set("server.port", 9090);

    assert_eq!(store.get_as::<u16>("server.port").unwrap(), Some(9090));
    assert_eq!(store.get_as::<bool>("server.tls.enabled").unwrap(), Some(true));
    assert_eq!(
        store.get_in(Layer::Original, "server.port"),
        Some(&ConfigNode::from(8080))
    );
    assert_flattened(&store, Layer::Original);
}
