//! Source string classification
//!
//! Classification order: local path, SSH URL, HTTPS URL (including tree URLs),
//! then GitHub shorthand. Refs are split on the first `@` only, so a ref may
//! itself contain `@`.

use std::path::{Path, PathBuf};

use crate::error::{self, AgntcError, Result};

use super::url::{github_clone_url, parse_tree_url, strip_git_suffix};
use super::{SourceDescriptor, SourceKind};

/// Parse a source string into a descriptor
///
/// Relative local paths are resolved against `base_dir`, never against the
/// process working directory.
pub fn resolve_source(input: &str, base_dir: &Path) -> Result<SourceDescriptor> {
    let input = input.trim();

    if input.is_empty() {
        return Err(error::source::invalid(input, "source is empty"));
    }

    if is_local_path(input) {
        return resolve_local(input, base_dir);
    }

    if let Some(rest) = input.strip_prefix("git@") {
        return resolve_ssh(input, rest);
    }

    if input.starts_with("https://") || input.starts_with("http://") {
        return resolve_https(input);
    }

    if input.contains("://") {
        return Err(error::source::invalid(input, "unsupported URL scheme"));
    }

    resolve_shorthand(input)
}

fn is_local_path(input: &str) -> bool {
    input == "."
        || input == ".."
        || input.starts_with("./")
        || input.starts_with("../")
        || input.starts_with('~')
        || input.starts_with('/')
        || Path::new(input).is_absolute()
}

fn expand_home(input: &str) -> Option<PathBuf> {
    let rest = input.strip_prefix('~')?;
    let home = dirs::home_dir()?;
    let rest = rest.trim_start_matches('/');
    Some(if rest.is_empty() { home } else { home.join(rest) })
}

fn resolve_local(input: &str, base_dir: &Path) -> Result<SourceDescriptor> {
    let path = if input.starts_with('~') {
        expand_home(input).ok_or_else(|| error::source::path_not_found(input))?
    } else {
        base_dir.join(input)
    };

    if !path.is_dir() {
        return Err(error::source::path_not_found(input));
    }

    let path = std::fs::canonicalize(&path).map_err(|_| error::source::path_not_found(input))?;
    let repo = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    Ok(SourceDescriptor {
        kind: SourceKind::LocalPath,
        owner: String::new(),
        repo,
        git_ref: None,
        clone_url: None,
        manifest_key: path.display().to_string(),
        target_plugin: None,
        local_path: Some(path),
    })
}

/// Split `main@ref` on the first `@`, rejecting an empty ref
fn split_ref<'a>(input: &str, target: &'a str) -> Result<(&'a str, Option<String>)> {
    match target.split_once('@') {
        Some((_, "")) => Err(AgntcError::EmptyRef {
            input: input.to_string(),
        }),
        Some((main, git_ref)) => Ok((main, Some(git_ref.to_string()))),
        None => Ok((target, None)),
    }
}

/// Split `owner/repo` into its two non-empty halves
fn split_owner_repo<'a>(input: &str, path: &'a str) -> Result<(&'a str, &'a str)> {
    let parts: Vec<&str> = path.split('/').collect();
    match parts.as_slice() {
        [_] => Err(error::source::invalid(input, "expected owner/repo")),
        [owner, repo] => {
            let repo = strip_git_suffix(repo);
            if owner.is_empty() {
                Err(AgntcError::EmptyOwner {
                    input: input.to_string(),
                })
            } else if repo.is_empty() {
                Err(AgntcError::EmptyRepo {
                    input: input.to_string(),
                })
            } else {
                Ok((owner, repo))
            }
        }
        _ => Err(AgntcError::TooManySegments {
            input: input.to_string(),
        }),
    }
}

fn remote(
    kind: SourceKind,
    owner: &str,
    repo: &str,
    git_ref: Option<String>,
    clone_url: String,
) -> SourceDescriptor {
    SourceDescriptor {
        kind,
        owner: owner.to_string(),
        repo: repo.to_string(),
        git_ref,
        clone_url: Some(clone_url),
        manifest_key: format!("{owner}/{repo}"),
        target_plugin: None,
        local_path: None,
    }
}

fn resolve_ssh(input: &str, after_user: &str) -> Result<SourceDescriptor> {
    let (host, path) = after_user
        .split_once(':')
        .ok_or_else(|| error::source::invalid(input, "SSH URL must look like git@host:owner/repo"))?;
    if host.is_empty() {
        return Err(error::source::invalid(input, "SSH URL has no host"));
    }

    let (path, git_ref) = split_ref(input, path)?;
    let (owner, repo) = split_owner_repo(input, path.trim_start_matches('/'))?;
    let clone_url = format!("git@{host}:{owner}/{repo}.git");

    Ok(remote(SourceKind::Ssh, owner, repo, git_ref, clone_url))
}

fn resolve_https(input: &str) -> Result<SourceDescriptor> {
    if let Some(tree) = parse_tree_url(input) {
        if tree.owner.is_empty() {
            return Err(AgntcError::EmptyOwner {
                input: input.to_string(),
            });
        }
        if tree.repo.is_empty() {
            return Err(AgntcError::EmptyRepo {
                input: input.to_string(),
            });
        }
        if tree.git_ref.is_empty() {
            return Err(AgntcError::EmptyRef {
                input: input.to_string(),
            });
        }

        let clone_url = format!("https://{}/{}/{}.git", tree.host, tree.owner, tree.repo);
        let mut descriptor = remote(
            SourceKind::Https,
            &tree.owner,
            &tree.repo,
            Some(tree.git_ref),
            clone_url,
        );
        if let Some(path) = tree.path {
            descriptor.kind = SourceKind::DirectPath;
            descriptor.manifest_key = format!("{}/{path}", descriptor.manifest_key);
            descriptor.target_plugin = Some(path);
        }
        return Ok(descriptor);
    }

    let (scheme, rest) = input
        .split_once("://")
        .ok_or_else(|| error::source::invalid(input, "malformed URL"))?;
    let rest = rest.trim_end_matches('/');
    let (host, path) = rest
        .split_once('/')
        .ok_or_else(|| error::source::invalid(input, "URL has no repository path"))?;
    if host.is_empty() {
        return Err(error::source::invalid(input, "URL has no host"));
    }

    let (owner, repo) = split_owner_repo(input, path)?;
    let clone_url = if host == "github.com" && scheme == "https" {
        github_clone_url(owner, repo)
    } else {
        format!("{scheme}://{host}/{owner}/{repo}.git")
    };

    Ok(remote(SourceKind::Https, owner, repo, None, clone_url))
}

fn resolve_shorthand(input: &str) -> Result<SourceDescriptor> {
    let (path, git_ref) = split_ref(input, input)?;
    let (owner, repo) = split_owner_repo(input, path)?;
    let clone_url = github_clone_url(owner, repo);

    Ok(remote(SourceKind::Shorthand, owner, repo, git_ref, clone_url))
}
