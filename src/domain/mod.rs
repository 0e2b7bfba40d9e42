// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing the configuration tree types.
//!
//! This module defines the canonical node tree, the inputs accepted by writes,
//! dotted paths and errors. It knows nothing about storage or layering.

pub mod config_input;
pub mod config_node;
pub mod config_path;
pub mod errors;

// Re-export commonly used types
pub use config_input::{ConfigInput, Provider};
pub use config_node::{ConfigNode, Fields, FromNode, ScalarValue};
pub use config_path::ConfigPath;
pub use errors::{ConfigError, Result};
