//! Test fixtures and utilities for reducing test setup duplication.
//!
//! This module provides helper functions to create common test environments
//! (temp projects, bundle trees, git repos with commits) with a single call.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{create_temp_dir, create_git_repo, commit_all};
//!
//! #[test]
//! fn my_test() {
//!     let project = create_temp_dir();
//!     let (_temp, repo) = create_git_repo();
//!     create_test_files(&repo, &[("SKILL.md", "# skill")]);
//!     let sha = commit_all(&repo, "init");
//! }
//! ```

#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(crate::temp::temp_dir_base()).expect("Failed to create temp directory")
}

/// Create a temp directory with a git repository initialized.
///
/// Returns the `TempDir` (which cleans up on drop) and the path to the repo.
///
/// # Panics
///
/// Panics if the temp directory or git repository cannot be created.
#[must_use]
pub fn create_git_repo() -> (TempDir, PathBuf) {
    let temp = create_temp_dir();
    let path = temp.path().to_path_buf();
    git2::Repository::init(&path).expect("Failed to init git repository");
    (temp, path)
}

/// Stage every file in the work tree and commit it on HEAD.
///
/// Returns the new commit SHA.
///
/// # Panics
///
/// Panics if any git step fails.
pub fn commit_all(repo_path: &Path, message: &str) -> String {
    let repo = git2::Repository::open(repo_path).expect("Failed to open repository");
    let mut index = repo.index().expect("Failed to open index");
    index
        .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
        .expect("Failed to stage files");
    index.write().expect("Failed to write index");

    let tree_id = index.write_tree().expect("Failed to write tree");
    let tree = repo.find_tree(tree_id).expect("Failed to find tree");
    let sig = git2::Signature::now("Test", "test@example.com").expect("Failed to build signature");

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("Failed to commit")
        .to_string()
}

/// Create test files under a base directory.
///
/// Takes a list of (path, content) tuples. A path ending in `/` creates an
/// empty directory.
///
/// # Panics
///
/// Panics if any file cannot be created.
pub fn create_test_files(base: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = base.join(path);
        if path.ends_with('/') {
            std::fs::create_dir_all(&full_path).expect("Failed to create directory");
            continue;
        }
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&full_path, content).expect("Failed to write test file");
    }
}

/// Write an `agntc.json` declaring `agents`.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_config(dir: &Path, agents: &[&str]) {
    let json = serde_json::json!({ "agents": agents });
    std::fs::create_dir_all(dir).expect("Failed to create bundle directory");
    std::fs::write(dir.join(crate::config::CONFIG_FILE), json.to_string())
        .expect("Failed to write agntc.json");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_git_repo() {
        let (temp, path) = create_git_repo();
        assert!(path.join(".git").exists());
        assert!(temp.path().exists());
    }

    #[test]
    fn test_commit_all_advances_head() {
        let (_temp, path) = create_git_repo();
        create_test_files(&path, &[("a.md", "a")]);
        let first = commit_all(&path, "first");
        create_test_files(&path, &[("b.md", "b")]);
        let second = commit_all(&path, "second");
        assert_ne!(first, second);
    }

    #[test]
    fn test_create_test_files_with_dirs() {
        let temp = create_temp_dir();
        create_test_files(temp.path(), &[("skills/empty/", ""), ("agents/a.md", "x")]);
        assert!(temp.path().join("skills/empty").is_dir());
        assert!(temp.path().join("agents/a.md").is_file());
    }
}
