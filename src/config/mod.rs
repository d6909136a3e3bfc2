//! Configuration file handling for agntc
//!
//! This module contains data structures for:
//! - `agntc.json` - Bundle configuration (declared agents)
//! - `.agntc/manifest.json` - Installed bundles in a project

pub mod bundle;
pub mod manifest;

pub use bundle::{BundleConfig, CONFIG_FILE, has_config, read_config};
pub use manifest::{Manifest, ManifestEntry};
