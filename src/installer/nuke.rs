//! File nuker
//!
//! Deletes tracked paths. Already-missing paths count as deleted; any other
//! failure (permission denied, ...) propagates.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{self, Result};

/// Resolve a tracked, project-relative path against the project root
///
/// Returns None for paths that are absolute or climb out of the project.
pub fn tracked_path(project_dir: &Path, relative: &str) -> Option<PathBuf> {
    let relative = Path::new(relative.trim_end_matches('/'));
    let contained = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !contained || relative.as_os_str().is_empty() {
        return None;
    }
    Some(project_dir.join(relative))
}

/// Delete every path in `files` under `project_dir`
pub fn nuke_files(project_dir: &Path, files: &[String]) -> Result<()> {
    for file in files {
        let Some(path) = tracked_path(project_dir, file) else {
            warn!(path = %file, "refusing to delete path outside the project");
            continue;
        };
        nuke_path(&path)?;
    }
    Ok(())
}

fn nuke_path(path: &Path) -> Result<()> {
    let metadata = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(error::fs::remove_failed(path, &e)),
    };

    let removed = if metadata.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };

    match removed {
        Ok(()) => {
            debug!(path = %path.display(), "removed");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(error::fs::remove_failed(path, &e)),
    }
}
