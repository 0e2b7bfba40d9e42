// SPDX-License-Identifier: MIT OR Apache-2.0

//! A layered configuration store addressed by dotted paths.
//!
//! Values are trees of structured nodes and scalar leaves. Every node of a stored
//! tree can be read directly through its path, e.g. `"database.pool.max"`, and
//! writes to any path keep the rest of the tree consistent.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types (`ConfigNode`, `ConfigInput`, `ConfigPath`, errors)
//! - **Ports**: Trait definitions for reading and writing (`ConfigReader`, `ConfigRepository`)
//! - **Service**: The layered store (`ConfigStore`) and its shared handle (`SharedConfig`)
//! - **Adapters**: File copying and YAML document conversion
//!
//! # Layers
//!
//! A store has two layers. The *original* layer holds defaults written with
//! `set_original`; the *active* layer holds values written with `set`. Reads
//! prefer the active layer. `has` only reports explicitly set paths.
//!
//! # Feature Flags
//!
//! - `yaml`: Enable conversion of YAML documents into store input (default)
//!
//! # Quick Start
//!
//! ```rust
//! use treecfg::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let mut store = ConfigStore::new();
//! store.set_original(
//!     "database",
//!     ConfigInput::map([
//!         ("host", ConfigInput::from("localhost")),
//!         ("pool", ConfigInput::map([("min", 1), ("max", 8)])),
//!     ]),
//! );
//! store.set("database.pool.max", 32);
//!
//! assert_eq!(store.get_as::<i64>("database.pool.max")?, Some(32));
//! assert_eq!(store.get_as::<String>("database.host")?.as_deref(), Some("localhost"));
//! # Ok(())
//! # }
//! ```
//!
//! Values can also be computed from what is already configured:
//!
//! ```rust
//! use treecfg::prelude::*;
//!
//! let mut store = ConfigStore::new();
//! store.set_original("paths.root", "/srv/app");
//! store.set(
//!     "paths.logs",
//!     ConfigInput::provider(|config| {
//!         let root = config.get("paths.root").and_then(ConfigNode::as_str).unwrap_or(".");
//!         format!("{}/logs", root)
//!     }),
//! );
//!
//! assert_eq!(store.get("paths.logs"), Some(&ConfigNode::from("/srv/app/logs")));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        ConfigError, ConfigInput, ConfigNode, ConfigPath, FromNode, Result, ScalarValue,
    };
    pub use crate::ports::{ConfigReader, ConfigRepository};
    pub use crate::service::{ConfigStore, Layer, PathMatching, SharedConfig, StoreOptions};

    #[cfg(feature = "yaml")]
    pub use crate::adapters::parse_yaml;
}
