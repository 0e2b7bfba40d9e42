// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the configuration store.
//!
//! This example demonstrates:
//! - Writing defaults and overrides into separate layers
//! - Reading whole subtrees and single leaves by dotted path
//! - Computing a value from existing configuration
//! - Sharing one store between threads
//!
//! To run this example:
//! ```bash
//! cargo run --example basic_usage
//! ```

use treecfg::prelude::*;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== Configuration Store: Basic Usage ===\n");

    let mut store = ConfigStore::new();

    // Example 1: Defaults live in the original layer
    println!("--- Example 1: Defaults ---");
    store.set_original(
        "database",
        ConfigInput::map([
            ("host", ConfigInput::from("localhost")),
            ("port", ConfigInput::from(5432)),
            ("pool", ConfigInput::map([("min", 1), ("max", 8)])),
        ]),
    );
    for path in store.paths(Layer::Original) {
        println!("  {} = {:?}", path, store.get(path));
    }
    println!();

    // Example 2: Overrides shadow defaults
    println!("--- Example 2: Overrides ---");
    store.set("database.pool.max", 32);
    let max: Option<u32> = store.get_as("database.pool.max")?;
    let port: Option<u16> = store.get_as("database.port")?;
    println!("  database.pool.max = {:?} (set: {})", max, store.has("database.pool.max"));
    println!("  database.port = {:?} (set: {})", port, store.has("database.port"));
    println!();

    // Example 3: Deferred values read what is already configured
    println!("--- Example 3: Deferred Values ---");
    store.set(
        "database.url",
        ConfigInput::provider(|config| {
            let host = config
                .get("database.host")
                .and_then(ConfigNode::as_str)
                .unwrap_or("localhost");
            format!("postgres://{}/app", host)
        }),
    );
    println!("  database.url = {:?}", store.get_as::<String>("database.url")?);
    println!();

    // Example 4: Missing values and fallbacks
    println!("--- Example 4: Fallbacks ---");
    println!("  cache.ttl present: {}", store.get("cache.ttl").is_some());
    println!("  cache.ttl = {}", store.get_or_default("cache.ttl", 300).as_i64("cache.ttl")?);
    println!();

    // Example 5: One store, many owners
    println!("--- Example 5: Shared Store ---");
    let shared = SharedConfig::new(store);
    let worker = shared.clone();
    let handle = std::thread::spawn(move || {
        worker.set("database.pool.max", 64);
    });
    if handle.join().is_err() {
        eprintln!("  worker thread panicked");
    }
    println!("  database.pool.max = {:?}", shared.config("database.pool.max"));

    println!("\n=== Example Complete ===");

    Ok(())
}
