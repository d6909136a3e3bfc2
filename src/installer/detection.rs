//! Bundle type detection
//!
//! Classifies a directory tree, in priority order:
//! 1. config + `SKILL.md` + no asset dirs -> bare skill
//! 2. config + any of `skills/`, `agents/`, `hooks/` -> plugin
//! 3. config but neither -> not agntc
//! 4. no config: immediate subdirectories with their own config -> collection
//! 5. otherwise -> not agntc
//!
//! The result is recomputed for every operation and never cached.

use std::path::Path;

use tracing::warn;

use crate::agent::AssetType;
use crate::config::has_config;

/// Marker file of a bare skill
pub const SKILL_FILE: &str = "SKILL.md";

/// Detected layout of a bundle directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleType {
    BareSkill,
    /// Present asset dirs, in `skills`, `agents`, `hooks` order
    Plugin { asset_dirs: Vec<AssetType> },
    /// Sorted names of subdirectories that carry their own config
    Collection { plugins: Vec<String> },
    NotAgntc,
}

impl BundleType {
    /// Whether this type can be installed directly (bare skill or plugin)
    pub fn is_installable(&self) -> bool {
        matches!(self, BundleType::BareSkill | BundleType::Plugin { .. })
    }
}

/// Detect the bundle type of `dir`; `has_config` says whether `dir` has its own config
pub fn detect_bundle_type(dir: &Path, has_config: bool) -> BundleType {
    if !has_config {
        let plugins = collection_members(dir);
        return if plugins.is_empty() {
            BundleType::NotAgntc
        } else {
            BundleType::Collection { plugins }
        };
    }

    let has_skill_file = dir.join(SKILL_FILE).is_file();
    let asset_dirs: Vec<AssetType> = AssetType::ALL
        .into_iter()
        .filter(|asset| dir.join(asset.dir_name()).is_dir())
        .collect();

    if asset_dirs.is_empty() {
        if has_skill_file {
            return BundleType::BareSkill;
        }
        warn!(dir = %dir.display(), "config present but no SKILL.md or asset directories");
        return BundleType::NotAgntc;
    }

    if has_skill_file {
        warn!(dir = %dir.display(), "SKILL.md ignored: bundle has asset directories and installs as a plugin");
    }
    BundleType::Plugin { asset_dirs }
}

/// Immediate, non-hidden subdirectories that have their own config
fn collection_members(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut plugins: Vec<String> = entries
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| !name.starts_with('.'))
        .filter(|name| has_config(&dir.join(name)))
        .collect();
    plugins.sort();
    plugins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{create_temp_dir, create_test_files, write_config};

    #[test]
    fn test_bare_skill() {
        let temp = create_temp_dir();
        create_test_files(temp.path(), &[("SKILL.md", "# skill"), ("notes/extra.md", "x")]);
        assert_eq!(detect_bundle_type(temp.path(), true), BundleType::BareSkill);
    }

    #[test]
    fn test_plugin_asset_dirs_in_fixed_order() {
        let temp = create_temp_dir();
        create_test_files(temp.path(), &[("hooks/", ""), ("skills/a/SKILL.md", "a")]);
        assert_eq!(
            detect_bundle_type(temp.path(), true),
            BundleType::Plugin {
                asset_dirs: vec![AssetType::Skills, AssetType::Hooks]
            }
        );
    }

    #[test]
    fn test_plugin_wins_over_skill_file() {
        let temp = create_temp_dir();
        create_test_files(temp.path(), &[("SKILL.md", "# skill"), ("agents/a.md", "a")]);
        assert_eq!(
            detect_bundle_type(temp.path(), true),
            BundleType::Plugin {
                asset_dirs: vec![AssetType::Agents]
            }
        );
    }

    #[test]
    fn test_config_without_layout_is_not_agntc() {
        let temp = create_temp_dir();
        create_test_files(temp.path(), &[("README.md", "hi")]);
        assert_eq!(detect_bundle_type(temp.path(), true), BundleType::NotAgntc);
    }

    #[test]
    fn test_collection_lists_configured_subdirs_sorted() {
        let temp = create_temp_dir();
        write_config(&temp.path().join("zeta"), &["claude"]);
        write_config(&temp.path().join("alpha"), &["claude"]);
        write_config(&temp.path().join(".hidden"), &["claude"]);
        create_test_files(temp.path(), &[("plain/README.md", "x")]);
        write_config(&temp.path().join("deep/nested"), &["claude"]);

        assert_eq!(
            detect_bundle_type(temp.path(), false),
            BundleType::Collection {
                plugins: vec!["alpha".to_string(), "zeta".to_string()]
            }
        );
    }

    #[test]
    fn test_no_config_nothing_qualifies() {
        let temp = create_temp_dir();
        create_test_files(temp.path(), &[("SKILL.md", "# skill"), ("skills/", "")]);
        assert_eq!(detect_bundle_type(temp.path(), false), BundleType::NotAgntc);
    }
}
