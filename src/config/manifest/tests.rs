//! Tests for manifest module

use chrono::{TimeZone, Utc};

use super::*;
use crate::agent::AgentId;
use crate::error::AgntcError;
use crate::test_fixtures::create_temp_dir;

fn sample_entry() -> ManifestEntry {
    ManifestEntry {
        git_ref: Some("v1.0".to_string()),
        commit: Some("abc123".to_string()),
        installed_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
        agents: vec![AgentId::from("claude")],
        files: vec![".claude/skills/my-skill/".to_string()],
        clone_url: Some("https://github.com/owner/repo.git".to_string()),
    }
}

#[test]
fn test_read_missing_manifest_is_empty() {
    let project = create_temp_dir();
    let manifest = Manifest::read(project.path()).unwrap();
    assert!(manifest.is_empty());
}

#[test]
fn test_write_then_read_round_trip() {
    let project = create_temp_dir();
    let manifest = Manifest::new().add_entry("owner/repo", sample_entry());
    manifest.write(project.path()).unwrap();

    let read = Manifest::read(project.path()).unwrap();
    assert_eq!(read, manifest);
}

#[test]
fn test_written_format() {
    let project = create_temp_dir();
    Manifest::new()
        .add_entry("owner/repo", sample_entry())
        .write(project.path())
        .unwrap();

    let raw = std::fs::read_to_string(Manifest::path(project.path())).unwrap();
    assert!(raw.ends_with("}\n"));
    assert!(raw.contains("  \"owner/repo\": {"));

    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entry = &value["owner/repo"];
    assert_eq!(entry["ref"], "v1.0");
    assert_eq!(entry["commit"], "abc123");
    assert_eq!(entry["installedAt"], "2026-01-02T03:04:05Z");
    assert_eq!(entry["agents"][0], "claude");
    assert_eq!(entry["cloneUrl"], "https://github.com/owner/repo.git");
}

#[test]
fn test_local_entry_serializes_nulls() {
    let entry = ManifestEntry::local(vec![AgentId::from("codex")], vec![]);
    let json = serde_json::to_value(&entry).unwrap();
    assert!(json["ref"].is_null());
    assert!(json["commit"].is_null());
    assert!(entry.is_local());
}

#[test]
fn test_clone_url_is_optional_on_read() {
    let json = r#"{
  "owner/repo": {
    "ref": null,
    "commit": "abc",
    "installedAt": "2026-01-02T03:04:05.000Z",
    "agents": ["claude"],
    "files": [".claude/skills/repo/"]
  }
}"#;
    let manifest = Manifest::from_json(json, "manifest.json").unwrap();
    let entry = manifest.get("owner/repo").unwrap();
    assert_eq!(entry.clone_url, None);
    assert_eq!(entry.commit.as_deref(), Some("abc"));
}

#[test]
fn test_corrupt_manifest_is_error() {
    let project = create_temp_dir();
    let path = Manifest::path(project.path());
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ nope").unwrap();

    let err = Manifest::read(project.path()).unwrap_err();
    assert!(matches!(err, AgntcError::ManifestCorrupt { .. }));
}

#[test]
fn test_add_and_remove_are_copy_on_write() {
    let original = Manifest::new().add_entry("a/b", sample_entry());
    let added = original.add_entry("c/d", sample_entry());
    let removed = added.remove_entry("a/b");

    assert_eq!(original.len(), 1);
    assert_eq!(added.len(), 2);
    assert!(!removed.contains("a/b"));
    assert!(removed.contains("c/d"));
}

#[test]
fn test_keys_iterate_sorted() {
    let manifest = Manifest::new()
        .add_entry("zeta/repo", sample_entry())
        .add_entry("alpha/repo", sample_entry());
    let keys: Vec<_> = manifest.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["alpha/repo", "zeta/repo"]);
}
