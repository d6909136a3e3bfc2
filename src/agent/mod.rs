//! Agent drivers
//!
//! This module handles:
//! - Agent identity ([`AgentId`]) and installable asset types ([`AssetType`])
//! - The [`AgentDriver`] capability: detection and per-asset target directories
//! - Driver registration and lookup (via [`registry::AgentRegistry`])
//! - Concurrent agent detection (via [`detection`])

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod detection;
pub mod registry;

pub use registry::AgentRegistry;

/// Agent identifier (e.g., "claude", "codex")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Kind of asset a plugin can ship, in the fixed order they are processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssetType {
    Skills,
    Agents,
    Hooks,
}

impl AssetType {
    pub const ALL: [AssetType; 3] = [AssetType::Skills, AssetType::Agents, AssetType::Hooks];

    /// Directory name inside a plugin (`skills`, `agents`, `hooks`)
    pub fn dir_name(self) -> &'static str {
        match self {
            AssetType::Skills => "skills",
            AssetType::Agents => "agents",
            AssetType::Hooks => "hooks",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Per-agent install capability
///
/// Implement this to teach agntc about a new agent, then register it in an
/// [`AgentRegistry`]. Nothing in the installer needs to change.
pub trait AgentDriver: Send + Sync {
    fn id(&self) -> AgentId;

    /// Whether this agent is in use in the project. Errors count as "not detected".
    fn detect(&self, project_dir: &Path) -> Result<bool>;

    /// Project-relative directory (`/`-separated, no trailing slash) that receives
    /// `asset` files, or None if the agent does not support that asset type
    fn target_dir(&self, asset: AssetType) -> Option<String>;
}

/// An agent paired with its driver, in caller-chosen order
#[derive(Clone, Copy)]
pub struct AgentTarget<'a> {
    pub id: &'a AgentId,
    pub driver: &'a dyn AgentDriver,
}

impl fmt::Debug for AgentTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentTarget").field("id", self.id).finish()
    }
}

/// Driver for agents that keep everything under one dot-directory
///
/// Detection looks for `detect_dir` in the project root.
#[derive(Debug, Clone)]
pub struct DirectoryAgent {
    pub id: AgentId,
    pub detect_dir: String,
    pub skills: Option<String>,
    pub agents: Option<String>,
    pub hooks: Option<String>,
}

impl AgentDriver for DirectoryAgent {
    fn id(&self) -> AgentId {
        self.id.clone()
    }

    fn detect(&self, project_dir: &Path) -> Result<bool> {
        Ok(project_dir.join(&self.detect_dir).is_dir())
    }

    fn target_dir(&self, asset: AssetType) -> Option<String> {
        match asset {
            AssetType::Skills => self.skills.clone(),
            AssetType::Agents => self.agents.clone(),
            AssetType::Hooks => self.hooks.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&vec![AgentId::from("claude")]).unwrap();
        assert_eq!(json, r#"["claude"]"#);
    }

    #[test]
    fn test_asset_type_order_and_names() {
        let names: Vec<_> = AssetType::ALL.iter().map(|a| a.dir_name()).collect();
        assert_eq!(names, ["skills", "agents", "hooks"]);
    }

    #[test]
    fn test_directory_agent_detection() {
        let temp = tempfile::TempDir::new().unwrap();
        let agent = DirectoryAgent {
            id: AgentId::from("claude"),
            detect_dir: ".claude".to_string(),
            skills: Some(".claude/skills".to_string()),
            agents: None,
            hooks: None,
        };

        assert!(!agent.detect(temp.path()).unwrap());
        std::fs::create_dir(temp.path().join(".claude")).unwrap();
        assert!(agent.detect(temp.path()).unwrap());

        assert_eq!(
            agent.target_dir(AssetType::Skills).as_deref(),
            Some(".claude/skills")
        );
        assert_eq!(agent.target_dir(AssetType::Hooks), None);
    }
}
