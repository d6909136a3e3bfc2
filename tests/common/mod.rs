//! Common test utilities for agntc integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A scratch project directory
pub struct TestProject {
    pub temp: TempDir,
    pub path: PathBuf,
}

impl TestProject {
    /// Create a new test project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp
            .path()
            .canonicalize()
            .expect("Failed to canonicalize temp directory");
        Self { temp, path }
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        write_file(&self.path, path, content);
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Create an agent's marker directory (`.claude`, `.codex`)
    pub fn create_agent_dir(&self, agent: &str) -> PathBuf {
        let agent_path = self.path.join(format!(".{agent}"));
        std::fs::create_dir_all(&agent_path).expect("Failed to create agent directory");
        agent_path
    }

    /// Parsed `.agntc/manifest.json`
    pub fn manifest_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.read_file(".agntc/manifest.json")).expect("Manifest is not JSON")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a file under `base`, creating parent directories
pub fn write_file(base: &Path, path: &str, content: &str) {
    let file_path = base.join(path);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(&file_path, content).expect("Failed to write file");
}

/// Write `agntc.json` declaring `agents` into `dir`
pub fn write_config(dir: &Path, agents: &[&str]) {
    let json = serde_json::json!({ "agents": agents });
    write_file(dir, "agntc.json", &json.to_string());
}

/// Create a bare skill directory named `name` under `base`
pub fn create_skill(base: &Path, name: &str, agents: &[&str], body: &str) -> PathBuf {
    let dir = base.join(name);
    write_config(&dir, agents);
    write_file(&dir, "SKILL.md", body);
    dir
}

/// A git repository standing in for a remote
pub struct GitOrigin {
    pub temp: TempDir,
    pub path: PathBuf,
}

impl GitOrigin {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().join("repo");
        git2::Repository::init(&path).expect("Failed to init git repository");
        Self { temp, path }
    }

    /// `file://` URL usable by `git clone` and `git ls-remote`
    pub fn url(&self) -> String {
        format!("file://{}", self.path.display())
    }

    pub fn write_file(&self, path: &str, content: &str) {
        write_file(&self.path, path, content);
    }

    pub fn remove_path(&self, path: &str) {
        let full = self.path.join(path);
        if full.is_dir() {
            std::fs::remove_dir_all(full).expect("Failed to remove directory");
        } else {
            std::fs::remove_file(full).expect("Failed to remove file");
        }
    }

    /// Stage everything (including deletions) and commit; returns the SHA
    pub fn commit(&self, message: &str) -> String {
        let repo = git2::Repository::open(&self.path).expect("Failed to open repository");
        let mut index = repo.index().expect("Failed to open index");
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .expect("Failed to stage files");
        index
            .update_all(["*"].iter(), None)
            .expect("Failed to stage deletions");
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

    /// Lightweight tag on HEAD
    pub fn tag(&self, name: &str) {
        let repo = git2::Repository::open(&self.path).expect("Failed to open repository");
        let head = repo
            .head()
            .and_then(|h| h.peel(git2::ObjectType::Commit))
            .expect("Failed to resolve HEAD");
        repo.tag_lightweight(name, &head, false)
            .expect("Failed to create tag");
    }
}

impl Default for GitOrigin {
    fn default() -> Self {
        Self::new()
    }
}

/// Path to the agntc binary
pub fn agntc_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_agntc"))
}
