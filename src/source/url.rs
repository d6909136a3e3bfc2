//! Git URL helpers
//!
//! Provides functions for splitting repository URLs and deriving clone URLs.

/// Strip a trailing `.git` from a repository name
pub fn strip_git_suffix(name: &str) -> &str {
    name.strip_suffix(".git").unwrap_or(name)
}

/// Canonical GitHub HTTPS clone URL for `owner/repo`
pub fn github_clone_url(owner: &str, repo: &str) -> String {
    format!("https://github.com/{owner}/{repo}.git")
}

/// Derive a clone URL from a manifest key's first two segments
///
/// Collection members (`owner/repo/name`) map to the repository they came from.
/// Returns None when the key has fewer than two non-empty segments.
pub fn clone_url_from_key(key: &str) -> Option<String> {
    let mut parts = key.split('/');
    let owner = parts.next().filter(|s| !s.is_empty())?;
    let repo = parts.next().filter(|s| !s.is_empty())?;
    Some(github_clone_url(owner, repo))
}

/// A tree URL: `https://{host}/{owner}/{repo}/tree/{ref}/{path}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeUrl {
    pub host: String,
    pub owner: String,
    pub repo: String,
    pub git_ref: String,
    pub path: Option<String>,
}

/// Parse a web UI tree URL
///
/// Returns None if the URL does not have the `tree` form.
pub fn parse_tree_url(input: &str) -> Option<TreeUrl> {
    let without_scheme = input
        .strip_prefix("https://")
        .or_else(|| input.strip_prefix("http://"))?;

    // {host}/{owner}/{repo}/tree/{ref}/{path...}
    let parts: Vec<&str> = without_scheme.trim_end_matches('/').split('/').collect();
    if parts.len() < 5 || parts[3] != "tree" {
        return None;
    }

    let path = if parts.len() > 5 {
        Some(parts[5..].join("/"))
    } else {
        None
    };

    Some(TreeUrl {
        host: parts[0].to_string(),
        owner: parts[1].to_string(),
        repo: strip_git_suffix(parts[2]).to_string(),
        git_ref: parts[4].to_string(),
        path,
    })
}
