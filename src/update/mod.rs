//! Remote update classification
//!
//! Decides, with exactly one `git ls-remote` per entry, whether an installed
//! bundle is stale:
//! - no ref and no commit: local install, no network call
//! - no ref: compare the remote `HEAD`
//! - version-like ref: list tags and report newer ones
//! - any other ref: compare the remote branch head
//!
//! Failures never escape the classifier; they become [`UpdateCheckResult::CheckFailed`].

pub mod version;

use std::cmp::Ordering;

use rayon::prelude::*;
use tracing::debug;

use crate::config::ManifestEntry;
use crate::error::Result;
use crate::git::{GitOptions, ls_remote, parse_ls_remote};
use crate::source::url::clone_url_from_key;

use version::{compare_versions, is_version_ref, version_order};

/// Staleness of one manifest entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateCheckResult {
    Local,
    UpToDate,
    UpdateAvailable { remote_commit: String },
    /// Tags newer than the installed one, ascending
    NewerTags { tags: Vec<String> },
    CheckFailed { reason: String },
}

/// What to ask the remote for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefQuery<'a> {
    Head,
    Tags,
    Branch(&'a str),
}

impl RefQuery<'_> {
    /// `git ls-remote` arguments for `url`
    pub fn args(&self, url: &str) -> Vec<String> {
        match self {
            RefQuery::Head => vec![url.to_string(), "HEAD".to_string()],
            RefQuery::Tags => vec!["--tags".to_string(), url.to_string()],
            RefQuery::Branch(branch) => vec![url.to_string(), format!("refs/heads/{branch}")],
        }
    }
}

/// Remote ref lookup, returning raw `ls-remote` output
pub trait RemoteRefs: Sync {
    fn ls_remote(&self, url: &str, query: RefQuery<'_>) -> Result<String>;
}

/// [`RemoteRefs`] backed by the git CLI
#[derive(Debug, Clone, Default)]
pub struct GitRemoteRefs {
    pub options: GitOptions,
}

impl RemoteRefs for GitRemoteRefs {
    fn ls_remote(&self, url: &str, query: RefQuery<'_>) -> Result<String> {
        let args = query.args(url);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        ls_remote(&args, &self.options)
    }
}

/// Classify one entry
pub fn check_for_update(key: &str, entry: &ManifestEntry, remote: &dyn RemoteRefs) -> UpdateCheckResult {
    if entry.git_ref.is_none() && entry.commit.is_none() {
        return UpdateCheckResult::Local;
    }

    let Some(url) = entry.clone_url.clone().or_else(|| clone_url_from_key(key)) else {
        return UpdateCheckResult::CheckFailed {
            reason: format!("Cannot derive a clone URL for '{key}'"),
        };
    };

    let result = match entry.git_ref.as_deref() {
        None => check_head(&url, entry, remote),
        Some(tag) if is_version_ref(tag) => check_tags(&url, tag, remote),
        Some(branch) => check_branch(&url, branch, entry, remote),
    };

    result.unwrap_or_else(|e| UpdateCheckResult::CheckFailed {
        reason: e.to_string(),
    })
}

fn compare_commit(entry: &ManifestEntry, remote_commit: String) -> UpdateCheckResult {
    if entry.commit.as_deref() == Some(remote_commit.as_str()) {
        UpdateCheckResult::UpToDate
    } else {
        UpdateCheckResult::UpdateAvailable { remote_commit }
    }
}

fn check_head(url: &str, entry: &ManifestEntry, remote: &dyn RemoteRefs) -> Result<UpdateCheckResult> {
    let refs = parse_ls_remote(&remote.ls_remote(url, RefQuery::Head)?);
    let head = refs
        .iter()
        .find(|r| r.name == "HEAD")
        .or_else(|| refs.first());
    Ok(match head {
        Some(head) => compare_commit(entry, head.sha.clone()),
        None => UpdateCheckResult::CheckFailed {
            reason: "No HEAD ref found on remote".to_string(),
        },
    })
}

fn check_branch(
    url: &str,
    branch: &str,
    entry: &ManifestEntry,
    remote: &dyn RemoteRefs,
) -> Result<UpdateCheckResult> {
    let wanted = format!("refs/heads/{branch}");
    let refs = parse_ls_remote(&remote.ls_remote(url, RefQuery::Branch(branch))?);
    Ok(match refs.into_iter().find(|r| r.name == wanted) {
        Some(head) => compare_commit(entry, head.sha),
        None => UpdateCheckResult::CheckFailed {
            reason: format!("Branch '{branch}' not found on remote"),
        },
    })
}

fn check_tags(url: &str, installed: &str, remote: &dyn RemoteRefs) -> Result<UpdateCheckResult> {
    let refs = parse_ls_remote(&remote.ls_remote(url, RefQuery::Tags)?);
    let mut tags: Vec<String> = Vec::new();
    for r in refs {
        let Some(name) = r.name.strip_prefix("refs/tags/") else {
            continue;
        };
        if name.ends_with("^{}") || tags.iter().any(|t| t == name) {
            continue;
        }
        tags.push(name.to_string());
    }

    if !tags.iter().any(|t| t == installed) {
        return Ok(UpdateCheckResult::CheckFailed {
            reason: format!("Tag '{installed}' not found on remote"),
        });
    }

    let mut newer: Vec<String> = tags
        .into_iter()
        .filter(|t| is_version_ref(t) && version_order(t, installed) == Ordering::Greater)
        .collect();
    newer.sort_by(|a, b| compare_versions(a, b));

    debug!(installed, newer = newer.len(), "compared remote tags");
    Ok(if newer.is_empty() {
        UpdateCheckResult::UpToDate
    } else {
        UpdateCheckResult::NewerTags { tags: newer }
    })
}

/// Classify many entries concurrently, one remote query per entry
///
/// Results come back in input order. A failing key only affects its own result.
pub fn check_all<'a, I>(entries: I, remote: &dyn RemoteRefs) -> Vec<(String, UpdateCheckResult)>
where
    I: IntoIterator<Item = (&'a String, &'a ManifestEntry)>,
{
    let entries: Vec<(&String, &ManifestEntry)> = entries.into_iter().collect();
    entries
        .par_iter()
        .map(|(key, entry)| ((*key).clone(), check_for_update(key, entry, remote)))
        .collect()
}
