//! Git reference resolution
//!
//! This module handles:
//! - Resolving the checked-out commit of a fresh clone
//! - Querying remote refs with `git ls-remote` without cloning
//! - Parsing `ls-remote` output into (sha, ref) pairs

use std::path::Path;

use git2::Repository;

use super::GitOptions;
use super::error::summarize_stderr;
use super::process::run_git;
use crate::error::{self, AgntcError, Result};

/// Resolve HEAD of a repository to a full commit SHA (`git rev-parse HEAD`)
pub fn resolve_head_commit(repo_path: &Path) -> Result<String> {
    let repo = Repository::open(repo_path).map_err(|e| AgntcError::GitRefResolveFailed {
        git_ref: "HEAD".to_string(),
        reason: e.message().to_string(),
    })?;
    let commit = repo.head()?.peel_to_commit()?;
    Ok(commit.id().to_string())
}

/// One `<sha>\t<refname>` line from `git ls-remote`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRef {
    pub sha: String,
    pub name: String,
}

/// Parse `git ls-remote` output, skipping blank and malformed lines
pub fn parse_ls_remote(stdout: &str) -> Vec<RemoteRef> {
    stdout
        .lines()
        .filter_map(|line| {
            let (sha, name) = line.split_once('\t')?;
            let sha = sha.trim();
            let name = name.trim();
            if sha.is_empty() || name.is_empty() {
                return None;
            }
            Some(RemoteRef {
                sha: sha.to_string(),
                name: name.to_string(),
            })
        })
        .collect()
}

/// Run `git ls-remote <args...>` once and return its stdout
///
/// There is no retry: a failed query is terminal for the caller's check.
pub fn ls_remote(args: &[&str], options: &GitOptions) -> Result<String> {
    let mut full = vec!["ls-remote"];
    full.extend_from_slice(args);

    let out = run_git(&full, None, options.ls_remote_timeout)?;
    if out.success {
        Ok(out.stdout)
    } else {
        Err(error::git::command_failed(
            "ls-remote",
            summarize_stderr(&out.stderr),
        ))
    }
}
