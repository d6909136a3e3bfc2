//! Operations module for installing, updating and removing bundles
//!
//! This module provides high-level operations that coordinate:
//! - AddOperation: resolve, fetch, detect, check conflicts, copy, record
//! - UpdateOperation: classify staleness and run the reinstall pipeline
//! - RemoveOperation: nuke an entry's files and drop it from the manifest
//! - list: installed entries in key order
//!
//! Operations return reports; printing is left to the CLI.

pub mod add;
pub mod list;
pub mod remove;
pub mod resolver;
pub mod update;

use std::path::Path;

use crate::agent::AgentRegistry;
use crate::config::{Manifest, ManifestEntry};
use crate::error::{AgntcError, Result};
use crate::git::SourceFetcher;
use crate::update::RemoteRefs;

pub use add::{AddOperation, AddOptions, AddReport, BundleOutcome};
pub use list::list_installed;
pub use remove::{RemoveOperation, RemoveReport};
pub use resolver::{ConflictReport, ConflictResolver, FixedResolver, Resolution};
pub use update::{UpdateOperation, UpdateReport, UpdateStatus};

/// Everything an operation needs from the outside world
///
/// The project root is always explicit; nothing reads the current directory.
#[derive(Clone, Copy)]
pub struct OperationContext<'a> {
    pub project_dir: &'a Path,
    pub registry: &'a AgentRegistry,
    pub fetcher: &'a dyn SourceFetcher,
    pub remote: &'a dyn RemoteRefs,
}

/// Entries addressed by `key`: the exact key, plus collection members `key/*`
///
/// Errors with `NotInstalled` when nothing matches.
pub(crate) fn select_entries(manifest: &Manifest, key: &str) -> Result<Vec<(String, ManifestEntry)>> {
    let key = key.trim_end_matches('/');
    let prefix = format!("{key}/");
    let selected: Vec<(String, ManifestEntry)> = manifest
        .iter()
        .filter(|(k, _)| k.as_str() == key || k.starts_with(&prefix))
        .map(|(k, e)| (k.clone(), e.clone()))
        .collect();

    if selected.is_empty() {
        return Err(AgntcError::NotInstalled {
            key: key.to_string(),
        });
    }
    Ok(selected)
}
