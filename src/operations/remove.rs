//! Remove operation
//!
//! Nukes an entry's files and drops it from the manifest. An `owner/repo`
//! key also removes every collection member recorded under it.

use tracing::info;

use crate::config::Manifest;
use crate::error::Result;
use crate::installer::nuke_files;

use super::{OperationContext, select_entries};

/// Keys removed and how many paths were deleted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveReport {
    pub removed: Vec<String>,
    pub files: usize,
}

pub struct RemoveOperation<'a> {
    ctx: OperationContext<'a>,
}

impl<'a> RemoveOperation<'a> {
    pub fn new(ctx: OperationContext<'a>) -> Self {
        Self { ctx }
    }

    /// Remove `key` (and its collection members)
    pub fn execute(&self, key: &str) -> Result<RemoveReport> {
        let mut manifest = Manifest::read(self.ctx.project_dir)?;
        let mut report = RemoveReport::default();

        for (key, entry) in select_entries(&manifest, key)? {
            if let Err(e) = nuke_files(self.ctx.project_dir, &entry.files) {
                // Keys removed so far have no files left; record that before failing
                manifest.write(self.ctx.project_dir)?;
                return Err(e);
            }
            manifest = manifest.remove_entry(&key);
            info!(key = %key, files = entry.files.len(), "removed bundle");
            report.files += entry.files.len();
            report.removed.push(key);
        }

        manifest.write(self.ctx.project_dir)?;
        Ok(report)
    }
}
