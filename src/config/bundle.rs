//! Bundle configuration (agntc.json)
//!
//! A bundle declares which agents it supports:
//!
//! ```json
//! { "agents": ["claude", "codex"] }
//! ```
//!
//! A missing file is not an error; it means "no config here" (a collection
//! root, or not an agntc bundle at all).

use std::path::Path;

use serde::Deserialize;
use serde_json::error::Category;
use tracing::warn;

use crate::agent::{AgentId, AgentRegistry};
use crate::error::{self, Result};

/// Bundle config file name
pub const CONFIG_FILE: &str = "agntc.json";

/// Parsed `agntc.json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleConfig {
    /// Declared agents known to the registry, in declaration order, deduplicated
    pub agents: Vec<AgentId>,

    /// Declared agents the registry does not know, filtered out of `agents`
    pub unknown_agents: Vec<String>,
}

/// `agntc.json` as written, before validation
#[derive(Debug, Deserialize)]
struct RawConfig {
    agents: Option<Vec<String>>,
}

impl BundleConfig {
    /// Parse config JSON, filtering agent ids against `registry`
    ///
    /// Broken JSON is `ConfigParseFailed`; well-formed JSON of the wrong shape
    /// is `ConfigInvalid`.
    pub fn from_json(json: &str, path: &str, registry: &AgentRegistry) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(json).map_err(|e| match e.classify() {
            Category::Data => error::config::invalid(path, e.to_string()),
            Category::Io | Category::Syntax | Category::Eof => {
                error::config::parse_failed(path, e.to_string())
            }
        })?;

        let declared = match raw.agents {
            Some(agents) if !agents.is_empty() => agents,
            Some(_) => return Err(error::config::invalid(path, "\"agents\" must not be empty")),
            None => return Err(error::config::invalid(path, "missing \"agents\"")),
        };

        let mut agents: Vec<AgentId> = Vec::new();
        let mut unknown_agents: Vec<String> = Vec::new();
        for id in declared {
            if registry.is_known(&id) {
                let id = AgentId::from(id.as_str());
                if !agents.contains(&id) {
                    agents.push(id);
                }
            } else if !unknown_agents.contains(&id) {
                unknown_agents.push(id);
            }
        }

        if !unknown_agents.is_empty() {
            warn!(path, unknown = ?unknown_agents, "ignoring unknown agents in config");
        }

        Ok(Self {
            agents,
            unknown_agents,
        })
    }
}

/// Read `agntc.json` from a bundle directory
///
/// Returns `Ok(None)` when the file does not exist.
pub fn read_config(dir: &Path, registry: &AgentRegistry) -> Result<Option<BundleConfig>> {
    let path = dir.join(CONFIG_FILE);
    let json = match std::fs::read_to_string(&path) {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(error::fs::read_failed(&path, &e)),
    };

    BundleConfig::from_json(&json, &path.display().to_string(), registry).map(Some)
}

/// Whether `dir` has its own config file
pub fn has_config(dir: &Path) -> bool {
    dir.join(CONFIG_FILE).is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AgntcError;
    use tempfile::TempDir;

    fn parse(json: &str) -> Result<BundleConfig> {
        BundleConfig::from_json(json, "agntc.json", &AgentRegistry::with_defaults())
    }

    #[test]
    fn test_parse_agents() {
        let config = parse(r#"{"agents": ["claude", "codex"]}"#).unwrap();
        assert_eq!(config.agents, vec![AgentId::from("claude"), AgentId::from("codex")]);
        assert!(config.unknown_agents.is_empty());
    }

    #[test]
    fn test_unknown_agents_are_filtered() {
        let config = parse(r#"{"agents": ["claude", "cursor", "claude"]}"#).unwrap();
        assert_eq!(config.agents, vec![AgentId::from("claude")]);
        assert_eq!(config.unknown_agents, vec!["cursor".to_string()]);
    }

    #[test]
    fn test_all_unknown_agents_yield_empty_list() {
        let config = parse(r#"{"agents": ["cursor"]}"#).unwrap();
        assert!(config.agents.is_empty());
    }

    #[test]
    fn test_invalid_configs() {
        assert!(matches!(parse("{not json"), Err(AgntcError::ConfigParseFailed { .. })));
        assert!(matches!(parse("[]"), Err(AgntcError::ConfigInvalid { .. })));
        assert!(matches!(parse("{}"), Err(AgntcError::ConfigInvalid { .. })));
        assert!(matches!(parse(r#"{"agents": []}"#), Err(AgntcError::ConfigInvalid { .. })));
        assert!(matches!(parse(r#"{"agents": "claude"}"#), Err(AgntcError::ConfigInvalid { .. })));
        assert!(matches!(parse(r#"{"agents": [1]}"#), Err(AgntcError::ConfigInvalid { .. })));
        assert!(matches!(parse(r#"{"agents": null}"#), Err(AgntcError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let config = parse(r#"{"agents": ["codex"], "name": "my-skill"}"#).unwrap();
        assert_eq!(config.agents, vec![AgentId::from("codex")]);
    }

    #[test]
    fn test_read_config_missing_is_none() {
        let temp = TempDir::new().unwrap();
        let registry = AgentRegistry::with_defaults();
        assert!(read_config(temp.path(), &registry).unwrap().is_none());
        assert!(!has_config(temp.path()));
    }

    #[test]
    fn test_read_config_malformed_is_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE), "{").unwrap();
        let registry = AgentRegistry::with_defaults();
        assert!(read_config(temp.path(), &registry).is_err());
    }
}
