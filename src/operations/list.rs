//! List operation

use std::path::Path;

use crate::config::{Manifest, ManifestEntry};
use crate::error::Result;

/// Installed entries in key order
pub fn list_installed(project_dir: &Path) -> Result<Vec<(String, ManifestEntry)>> {
    let manifest = Manifest::read(project_dir)?;
    Ok(manifest
        .iter()
        .map(|(key, entry)| (key.clone(), entry.clone()))
        .collect())
}
