//! Scoped temporary directories for clones
//!
//! Temp dirs are never created under the current working directory (e.g. when
//! TMPDIR=tmp or TMPDIR=./tmp), and they are removed when the owning scope
//! ends. Removal failures are logged and swallowed so cleanup never masks the
//! result of the operation that used the directory.

use std::env;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::warn;

use crate::error::{AgntcError, Result};

/// Returns a directory path suitable for creating temporary directories.
pub fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        #[cfg(windows)]
        {
            env::var("TEMP")
                .or_else(|_| env::var("TMP"))
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("C:\\Windows\\Temp"))
        }
        #[cfg(not(windows))]
        {
            PathBuf::from("/tmp")
        }
    }
}

/// An exclusively owned temp directory that is removed on drop
#[derive(Debug)]
pub struct ScopedTempDir {
    inner: Option<TempDir>,
}

impl ScopedTempDir {
    /// Create a fresh directory under [`temp_dir_base`]
    pub fn new() -> Result<Self> {
        let inner = tempfile::Builder::new()
            .prefix("agntc-")
            .tempdir_in(temp_dir_base())
            .map_err(|e| AgntcError::IoError {
                message: format!("Failed to create temp directory: {e}"),
            })?;
        Ok(Self { inner: Some(inner) })
    }

    pub fn path(&self) -> &Path {
        self.inner
            .as_ref()
            .map_or_else(|| Path::new(""), TempDir::path)
    }
}

impl Drop for ScopedTempDir {
    fn drop(&mut self) {
        if let Some(dir) = self.inner.take() {
            let path = dir.path().to_path_buf();
            if let Err(e) = dir.close() {
                warn!(path = %path.display(), error = %e, "failed to remove temp directory");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_base_is_absolute() {
        assert!(temp_dir_base().is_absolute());
    }

    #[test]
    fn test_scoped_temp_dir_removed_on_drop() {
        let dir = ScopedTempDir::new().unwrap();
        let path = dir.path().to_path_buf();
        std::fs::write(path.join("file"), "x").unwrap();
        assert!(path.exists());

        drop(dir);
        assert!(!path.exists());
    }

    #[test]
    fn test_drop_tolerates_already_removed_dir() {
        let dir = ScopedTempDir::new().unwrap();
        std::fs::remove_dir_all(dir.path()).unwrap();
        drop(dir);
    }
}
