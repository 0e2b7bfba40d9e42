// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the layered store.
//!
//! `ConfigStore` implements the repository ports; `SharedConfig` makes one
//! store available to many owners.

pub mod options;
pub mod shared;
pub mod store;
mod tree;

// Re-export commonly used types
pub use options::{PathMatching, StoreOptions};
pub use shared::SharedConfig;
pub use store::{ConfigStore, ConfigStoreBuilder, Layer};
