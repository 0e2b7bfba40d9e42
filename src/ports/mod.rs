// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! These traits describe the store's interface so that providers and
//! application code can depend on them rather than on `ConfigStore` itself.

pub mod repository;

pub use repository::{ConfigReader, ConfigRepository};
