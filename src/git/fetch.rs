//! Git source fetcher
//!
//! Shallow-clones a remote descriptor into an exclusively owned temp directory
//! and resolves the checked-out commit. On failure the temp directory is gone
//! before the error reaches the caller; on success the caller holds the
//! [`FetchedSource`] and the directory lives exactly as long as it does.

use std::path::{Path, PathBuf};

use tracing::info;

use super::GitOptions;
use super::clone::shallow_clone;
use super::refs::resolve_head_commit;
use crate::error::{self, Result};
use crate::source::SourceDescriptor;
use crate::temp::ScopedTempDir;

/// A checked-out remote source
#[derive(Debug)]
pub struct FetchedSource {
    checkout: PathBuf,
    pub commit: String,
    _dir: ScopedTempDir,
}

impl FetchedSource {
    /// Root of the checked-out repository
    ///
    /// Named after the repository, so a bare skill cloned from `owner/my-skill`
    /// installs as `my-skill/`.
    pub fn root(&self) -> &Path {
        &self.checkout
    }
}

/// Clone `url` at `git_ref` into a fresh temp directory
pub fn fetch(
    url: &str,
    repo_name: &str,
    git_ref: Option<&str>,
    options: &GitOptions,
) -> Result<FetchedSource> {
    let dir = ScopedTempDir::new()?;
    let checkout = dir.path().join(repo_name);

    // `dir` drops (and is removed) on every early return below
    shallow_clone(url, &checkout, git_ref, options)?;
    let commit = resolve_head_commit(&checkout)?;

    info!(url, commit = %commit, "fetched source");
    Ok(FetchedSource {
        checkout,
        commit,
        _dir: dir,
    })
}

/// Fetch a non-local descriptor
pub fn fetch_source(source: &SourceDescriptor, options: &GitOptions) -> Result<FetchedSource> {
    let url = source.clone_url.as_deref().ok_or_else(|| {
        error::source::invalid(&source.manifest_key, "local sources are not cloned")
    })?;
    fetch(url, &source.repo, source.git_ref.as_deref(), options)
}

/// Trait seam for the operations layer, so update flows can run without a network
pub trait SourceFetcher: Sync {
    fn fetch(&self, url: &str, repo_name: &str, git_ref: Option<&str>) -> Result<FetchedSource>;
}

/// Fetcher backed by the git CLI
#[derive(Debug, Clone, Default)]
pub struct GitFetcher {
    pub options: GitOptions,
}

impl SourceFetcher for GitFetcher {
    fn fetch(&self, url: &str, repo_name: &str, git_ref: Option<&str>) -> Result<FetchedSource> {
        fetch(url, repo_name, git_ref, &self.options)
    }
}
