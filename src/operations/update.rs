//! Update operation
//!
//! Classifies the selected entries concurrently, then:
//! - local entries are reinstalled from their recorded path
//! - update-available entries are grouped by (clone URL, ref) so the members
//!   of one collection share a single clone, then each runs the pipeline
//! - up-to-date, newer-tags and check-failed entries are only reported
//!
//! The manifest is written once, after every entry has been handled.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::agent::AgentId;
use crate::config::{Manifest, ManifestEntry};
use crate::error::Result;
use crate::installer::{ReinstallOutcome, ReinstallRequest, nuke_and_reinstall};
use crate::source::url::{clone_url_from_key, strip_git_suffix};
use crate::update::{UpdateCheckResult, check_all};

use super::{OperationContext, select_entries};

/// What happened to one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    Updated {
        commit: Option<String>,
        dropped_agents: Vec<AgentId>,
    },
    UpToDate,
    NewerTags { tags: Vec<String> },
    CheckFailed { reason: String },
    FetchFailed { error: String },
    NoConfig,
    InvalidType,
    NoAgents { declared: Vec<AgentId> },
    /// Files were removed and the copy failed; the entry was dropped
    CopyFailed { error: String, recovery_hint: String },
    Failed { error: String },
}

/// Per-entry results in key order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    pub entries: Vec<(String, UpdateStatus)>,
}

/// High-level update operation
pub struct UpdateOperation<'a> {
    ctx: OperationContext<'a>,
}

impl<'a> UpdateOperation<'a> {
    pub fn new(ctx: OperationContext<'a>) -> Self {
        Self { ctx }
    }

    fn selected(&self, manifest: &Manifest, key: Option<&str>) -> Result<Vec<(String, ManifestEntry)>> {
        match key {
            Some(key) => select_entries(manifest, key),
            None => Ok(manifest
                .iter()
                .map(|(k, e)| (k.clone(), e.clone()))
                .collect()),
        }
    }

    /// Classify entries without changing anything
    pub fn check(&self, key: Option<&str>) -> Result<Vec<(String, UpdateCheckResult)>> {
        let manifest = Manifest::read(self.ctx.project_dir)?;
        let selected = self.selected(&manifest, key)?;
        Ok(check_all(selected.iter().map(|(k, e)| (k, e)), self.ctx.remote))
    }

    /// Execute update operation
    pub fn execute(&self, key: Option<&str>) -> Result<UpdateReport> {
        let mut manifest = Manifest::read(self.ctx.project_dir)?;
        let selected = self.selected(&manifest, key)?;
        let checks = check_all(selected.iter().map(|(k, e)| (k, e)), self.ctx.remote);

        let entries: BTreeMap<&str, &ManifestEntry> =
            selected.iter().map(|(k, e)| (k.as_str(), e)).collect();
        let mut statuses: BTreeMap<String, UpdateStatus> = BTreeMap::new();
        let mut groups: BTreeMap<(String, Option<String>), Vec<String>> = BTreeMap::new();

        for (key, check) in checks {
            let Some(entry) = entries.get(key.as_str()).copied() else {
                continue;
            };
            let status = match check {
                UpdateCheckResult::Local => {
                    self.reinstall(&key, entry, Path::new(&key), None, &mut manifest)
                }
                UpdateCheckResult::UpToDate => UpdateStatus::UpToDate,
                UpdateCheckResult::NewerTags { tags } => UpdateStatus::NewerTags { tags },
                UpdateCheckResult::CheckFailed { reason } => UpdateStatus::CheckFailed { reason },
                UpdateCheckResult::UpdateAvailable { .. } => {
                    match entry.clone_url.clone().or_else(|| clone_url_from_key(&key)) {
                        Some(url) => {
                            groups.entry((url, entry.git_ref.clone())).or_default().push(key);
                            continue;
                        }
                        None => UpdateStatus::Failed {
                            error: "no clone URL recorded for this entry".to_string(),
                        },
                    }
                }
            };
            statuses.insert(key, status);
        }

        for ((url, git_ref), keys) in groups {
            let repo_name = repo_segment(&keys[0]);
            match self.ctx.fetcher.fetch(&url, &repo_name, git_ref.as_deref()) {
                Ok(fetched) => {
                    for key in keys {
                        let Some(entry) = entries.get(key.as_str()).copied() else {
                            continue;
                        };
                        let dir = member_dir(fetched.root(), &key);
                        let status =
                            self.reinstall(&key, entry, &dir, Some(fetched.commit.clone()), &mut manifest);
                        statuses.insert(key, status);
                    }
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "fetch failed; entries left unchanged");
                    for key in keys {
                        statuses.insert(key, UpdateStatus::FetchFailed { error: e.to_string() });
                    }
                }
            }
        }

        manifest.write(self.ctx.project_dir)?;
        Ok(UpdateReport {
            entries: statuses.into_iter().collect(),
        })
    }

    fn reinstall(
        &self,
        key: &str,
        entry: &ManifestEntry,
        source_dir: &Path,
        new_commit: Option<String>,
        manifest: &mut Manifest,
    ) -> UpdateStatus {
        let request = ReinstallRequest {
            key,
            entry,
            source_dir,
            project_dir: self.ctx.project_dir,
            new_ref: None,
            new_commit,
        };
        let mut on_dropped = |dropped: &[AgentId], declared: &[AgentId]| {
            warn!(key, ?dropped, ?declared, "new version no longer supports some installed agents");
        };

        match nuke_and_reinstall(request, self.ctx.registry, &mut on_dropped) {
            Ok(ReinstallOutcome::Success {
                entry,
                dropped_agents,
            }) => {
                info!(key, commit = ?entry.commit, "updated");
                let commit = entry.commit.clone();
                *manifest = manifest.add_entry(key, entry);
                UpdateStatus::Updated {
                    commit,
                    dropped_agents,
                }
            }
            Ok(ReinstallOutcome::CopyFailed {
                error,
                recovery_hint,
                ..
            }) => {
                *manifest = manifest.remove_entry(key);
                UpdateStatus::CopyFailed {
                    error: error.to_string(),
                    recovery_hint,
                }
            }
            Ok(ReinstallOutcome::NoConfig) => UpdateStatus::NoConfig,
            Ok(ReinstallOutcome::InvalidType { .. }) => UpdateStatus::InvalidType,
            Ok(ReinstallOutcome::NoAgents { declared }) => UpdateStatus::NoAgents { declared },
            Err(e) => UpdateStatus::Failed {
                error: e.to_string(),
            },
        }
    }
}

/// Repository name from a key's second segment
fn repo_segment(key: &str) -> String {
    key.split('/')
        .nth(1)
        .map(|repo| strip_git_suffix(repo).to_string())
        .unwrap_or_else(|| "bundle".to_string())
}

/// Bundle directory inside a checkout: `owner/repo/<path>` maps to `<root>/<path>`
fn member_dir(root: &Path, key: &str) -> PathBuf {
    match key.splitn(3, '/').nth(2) {
        Some(path) if !path.is_empty() => root.join(path),
        _ => root.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_dir() {
        let root = Path::new("/tmp/clone/repo");
        assert_eq!(member_dir(root, "owner/repo"), root);
        assert_eq!(member_dir(root, "owner/repo/alpha"), root.join("alpha"));
        assert_eq!(member_dir(root, "owner/repo/plugins/x"), root.join("plugins/x"));
    }

    #[test]
    fn test_repo_segment() {
        assert_eq!(repo_segment("owner/repo/alpha"), "repo");
        assert_eq!(repo_segment("owner/repo.git"), "repo");
    }
}
