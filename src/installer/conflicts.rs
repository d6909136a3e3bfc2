//! Conflict detection
//!
//! - Collisions: incoming paths already tracked by another manifest entry,
//!   matched by exact string equality (`skill/` never matches `skill-extra/`).
//! - Unmanaged conflicts: incoming paths tracked by no entry that already
//!   exist on disk.
//!
//! Both run before any copy. Resolution is up to the caller.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::config::Manifest;

use super::nuke::tracked_path;

/// Overlapping paths grouped by the manifest key that tracks them
pub type CollisionMap = BTreeMap<String, Vec<String>>;

/// Find incoming paths tracked by other entries; `self_key` is always excluded
pub fn detect_collisions(
    incoming: &[String],
    manifest: &Manifest,
    self_key: Option<&str>,
) -> CollisionMap {
    let incoming: HashSet<&str> = incoming.iter().map(String::as_str).collect();
    let mut collisions = CollisionMap::new();

    for (key, entry) in manifest.iter() {
        if Some(key.as_str()) == self_key {
            continue;
        }
        let overlap: Vec<String> = entry
            .files
            .iter()
            .filter(|file| incoming.contains(file.as_str()))
            .cloned()
            .collect();
        if !overlap.is_empty() {
            collisions.insert(key.clone(), overlap);
        }
    }
    collisions
}

/// Find incoming paths no entry tracks that already exist on disk
pub fn detect_unmanaged(incoming: &[String], manifest: &Manifest, project_dir: &Path) -> Vec<String> {
    let tracked: HashSet<&str> = manifest
        .iter()
        .flat_map(|(_, entry)| entry.files.iter().map(String::as_str))
        .collect();

    incoming
        .iter()
        .filter(|path| !tracked.contains(path.as_str()))
        .filter(|path| {
            tracked_path(project_dir, path)
                .is_some_and(|full| std::fs::symlink_metadata(full).is_ok())
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentId;
    use crate::config::ManifestEntry;
    use crate::test_fixtures::{create_temp_dir, create_test_files};

    fn entry(files: &[&str]) -> ManifestEntry {
        ManifestEntry::local(
            vec![AgentId::from("claude")],
            files.iter().map(ToString::to_string).collect(),
        )
    }

    fn strings(paths: &[&str]) -> Vec<String> {
        paths.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_exact_collision_single_key() {
        let manifest = Manifest::new()
            .add_entry("other/repo", entry(&[".claude/skills/shared/", ".claude/skills/mine/"]))
            .add_entry("third/repo", entry(&[".claude/skills/unrelated/"]));

        let collisions = detect_collisions(&strings(&[".claude/skills/shared/"]), &manifest, None);
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions["other/repo"], [".claude/skills/shared/"]);
    }

    #[test]
    fn test_no_prefix_matching() {
        let manifest = Manifest::new().add_entry("other/repo", entry(&[".claude/skills/skill-extended/"]));
        let collisions = detect_collisions(&strings(&[".claude/skills/skill/"]), &manifest, None);
        assert!(collisions.is_empty());
    }

    #[test]
    fn test_self_key_excluded() {
        let manifest = Manifest::new().add_entry("me/repo", entry(&[".claude/skills/mine/"]));
        let collisions =
            detect_collisions(&strings(&[".claude/skills/mine/"]), &manifest, Some("me/repo"));
        assert!(collisions.is_empty());
    }

    #[test]
    fn test_unmanaged_existing_paths() {
        let project = create_temp_dir();
        create_test_files(
            project.path(),
            &[
                (".claude/skills/hand-made/SKILL.md", "x"),
                (".claude/skills/empty/", ""),
                (".claude/skills/tracked/SKILL.md", "x"),
            ],
        );
        let manifest = Manifest::new().add_entry("a/b", entry(&[".claude/skills/tracked/"]));

        let incoming = strings(&[
            ".claude/skills/hand-made/",
            ".claude/skills/empty/",
            ".claude/skills/tracked/",
            ".claude/skills/absent/",
        ]);
        let unmanaged = detect_unmanaged(&incoming, &manifest, project.path());
        assert_eq!(unmanaged, [".claude/skills/hand-made/", ".claude/skills/empty/"]);
    }
}
