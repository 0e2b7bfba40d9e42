// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer connecting the store to the outside world.
//!
//! `file_copy` moves configuration files on disk; `yaml_value` converts parsed
//! YAML documents into store input.

pub mod file_copy;
#[cfg(feature = "yaml")]
pub mod yaml_value;

pub use file_copy::{copy_file, publish_to_config_dir, publish_to_dir};
#[cfg(feature = "yaml")]
pub use yaml_value::parse_yaml;
