//! agntc - install and update agent skills and plugins
//!
//! Bundles (bare skills, plugins, or collections of them) are fetched from git
//! repositories or local directories and copied into a project for each
//! supported agent. Everything agntc places is recorded in
//! `.agntc/manifest.json`, so it can be updated or removed later.

pub mod agent;
pub mod config;
pub mod error;
pub mod git;
pub mod installer;
pub mod operations;
pub mod source;
pub mod temp;
pub mod update;

#[cfg(test)]
mod test_fixtures;

pub use error::{AgntcError, Result};
