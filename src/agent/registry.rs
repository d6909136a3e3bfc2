//! Agent registry for managing driver implementations
//!
//! This module provides:
//! - Driver registration and lookup by agent id
//! - Ordered driver resolution for a list of agent ids
//! - Default agent definitions

use std::collections::HashMap;
use std::path::Path;

use super::{AgentDriver, AgentId, AgentTarget, DirectoryAgent};

/// Registry mapping agent id to its driver
pub struct AgentRegistry {
    drivers: Vec<Box<dyn AgentDriver>>,
    by_id: HashMap<AgentId, usize>,
}

impl AgentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            drivers: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    /// Create a registry with the built-in agents
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for driver in default_agents() {
            registry.register(Box::new(driver));
        }
        registry
    }

    /// Add a driver, replacing any driver registered under the same id
    pub fn register(&mut self, driver: Box<dyn AgentDriver>) {
        let id = driver.id();
        if let Some(&idx) = self.by_id.get(&id) {
            self.drivers[idx] = driver;
        } else {
            self.by_id.insert(id, self.drivers.len());
            self.drivers.push(driver);
        }
    }

    pub fn get(&self, id: &AgentId) -> Option<&dyn AgentDriver> {
        self.by_id.get(id).map(|&idx| &*self.drivers[idx])
    }

    pub fn is_known(&self, id: &str) -> bool {
        self.by_id.contains_key(&AgentId::from(id))
    }

    /// Registered ids in registration order
    pub fn known_ids(&self) -> Vec<AgentId> {
        self.drivers.iter().map(|d| d.id()).collect()
    }

    pub fn drivers(&self) -> impl Iterator<Item = &dyn AgentDriver> {
        self.drivers.iter().map(|d| &**d)
    }

    /// Pair each id with its driver, preserving order and skipping unknown ids
    pub fn drivers_for<'a>(&'a self, ids: &'a [AgentId]) -> Vec<AgentTarget<'a>> {
        ids.iter()
            .filter_map(|id| self.get(id).map(|driver| AgentTarget { id, driver }))
            .collect()
    }

    /// Ids of registered agents present in the project, in registration order
    pub fn detect_all(&self, project_dir: &Path) -> Vec<AgentId> {
        super::detection::detect_agents(self, project_dir)
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Get default agent definitions
pub fn default_agents() -> Vec<DirectoryAgent> {
    vec![
        // Claude Code
        DirectoryAgent {
            id: AgentId::from("claude"),
            detect_dir: ".claude".to_string(),
            skills: Some(".claude/skills".to_string()),
            agents: Some(".claude/agents".to_string()),
            hooks: Some(".claude/hooks".to_string()),
        },
        // Codex reads skills from the shared .agents/ tree
        DirectoryAgent {
            id: AgentId::from("codex"),
            detect_dir: ".codex".to_string(),
            skills: Some(".agents/skills".to_string()),
            agents: None,
            hooks: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AssetType;

    #[test]
    fn test_default_registry() {
        let registry = AgentRegistry::with_defaults();
        let ids: Vec<_> = registry.known_ids().iter().map(ToString::to_string).collect();
        assert_eq!(ids, ["claude", "codex"]);
        assert!(registry.is_known("claude"));
        assert!(!registry.is_known("cursor"));
    }

    #[test]
    fn test_targets_preserve_order_and_skip_unknown() {
        let registry = AgentRegistry::with_defaults();
        let ids = vec![
            AgentId::from("codex"),
            AgentId::from("mystery"),
            AgentId::from("claude"),
        ];
        let targets = registry.drivers_for(&ids);
        let names: Vec<_> = targets.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(names, ["codex", "claude"]);
    }

    #[test]
    fn test_register_replaces_existing_driver() {
        let mut registry = AgentRegistry::with_defaults();
        registry.register(Box::new(DirectoryAgent {
            id: AgentId::from("codex"),
            detect_dir: ".codex".to_string(),
            skills: Some(".codex/skills".to_string()),
            agents: None,
            hooks: None,
        }));

        assert_eq!(registry.known_ids().len(), 2);
        let codex = registry.get(&AgentId::from("codex")).unwrap();
        assert_eq!(
            codex.target_dir(AssetType::Skills).as_deref(),
            Some(".codex/skills")
        );
    }
}
