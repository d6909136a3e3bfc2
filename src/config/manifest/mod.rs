//! Manifest (.agntc/manifest.json)
//!
//! The manifest records every installed bundle keyed by its manifest key
//! (`owner/repo`, `owner/repo/<subpath>`, or an absolute local path). Keys are
//! kept sorted so the file diffs cleanly.
//!
//! Mutation helpers are copy-on-write: they return a new manifest and leave
//! the original untouched.

pub mod entry;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{self, Result};

pub use entry::ManifestEntry;

/// Directory holding agntc state inside a project
pub const MANIFEST_DIR: &str = ".agntc";

/// Manifest file name inside [`MANIFEST_DIR`]
pub const MANIFEST_FILE: &str = "manifest.json";

/// Manifest structure (.agntc/manifest.json)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: BTreeMap<String, ManifestEntry>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Location of the manifest for a project
    pub fn path(project_dir: &Path) -> PathBuf {
        project_dir.join(MANIFEST_DIR).join(MANIFEST_FILE)
    }

    /// Parse manifest from JSON string
    pub fn from_json(json: &str, path: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| error::config::manifest_corrupt(path, e.to_string()))
    }

    /// Serialize manifest to JSON (pretty-printed, trailing newline)
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)
            .map_err(|e| error::config::manifest_corrupt(MANIFEST_FILE, e.to_string()))?;
        json.push('\n');
        Ok(json)
    }

    /// Read the project's manifest
    ///
    /// A missing manifest (or missing `.agntc/`) reads as empty. Other read
    /// failures propagate.
    pub fn read(project_dir: &Path) -> Result<Self> {
        let path = Self::path(project_dir);
        match std::fs::read_to_string(&path) {
            Ok(json) => Self::from_json(&json, &path.display().to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no manifest, starting empty");
                Ok(Self::new())
            }
            Err(e) => Err(error::fs::read_failed(&path, &e)),
        }
    }

    /// Write the manifest, creating `.agntc/` if needed
    pub fn write(&self, project_dir: &Path) -> Result<()> {
        let dir = project_dir.join(MANIFEST_DIR);
        std::fs::create_dir_all(&dir).map_err(|e| error::fs::write_failed(&dir, &e))?;

        let path = Self::path(project_dir);
        let json = self.to_json()?;
        std::fs::write(&path, json).map_err(|e| error::fs::write_failed(&path, &e))?;
        debug!(path = %path.display(), entries = self.entries.len(), "wrote manifest");
        Ok(())
    }

    /// Copy of this manifest with `key` set to `entry`
    #[must_use]
    pub fn add_entry(&self, key: &str, entry: ManifestEntry) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(key.to_string(), entry);
        Self { entries }
    }

    /// Copy of this manifest without `key`
    #[must_use]
    pub fn remove_entry(&self, key: &str) -> Self {
        let mut entries = self.entries.clone();
        entries.remove(key);
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&ManifestEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ManifestEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
