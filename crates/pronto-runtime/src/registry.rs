//! Capability registry — name to agent lookup for dispatch.
//!
//! Owned by whoever wires the system up and handed to the orchestrator as a
//! value, so two orchestrators can run against disjoint registries in the
//! same process.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::agent::Agent;

/// Maps agent names to live agent handles.
///
/// Registration is last-write-wins; lookups clone the `Arc` so dispatch never
/// holds the lock across an await point.
pub struct AgentRegistry {
    agents: RwLock<HashMap<String, Arc<dyn Agent>>>,
}

impl AgentRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            agents: RwLock::new(HashMap::new()),
        }
    }

    /// Register an agent under its own name. Overwrites any previous entry.
    pub fn register(&self, agent: Arc<dyn Agent>) {
        debug!(agent = agent.name(), "agent registered");
        let _ = self.agents.write().insert(agent.name().to_owned(), agent);
    }

    /// Look up an agent by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Agent>> {
        self.agents.read().get(name).cloned()
    }

    /// All registered agent names, sorted alphabetically.
    #[must_use]
    pub fn list_agents(&self) -> Vec<String> {
        let mut names: Vec<String> = self.agents.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Tool names exposed by each registered agent.
    #[must_use]
    pub fn capabilities(&self) -> HashMap<String, Vec<String>> {
        self.agents
            .read()
            .values()
            .map(|agent| {
                let tools = agent
                    .tool_schemas()
                    .into_iter()
                    .map(|spec| spec.name)
                    .collect();
                (agent.name().to_owned(), tools)
            })
            .collect()
    }

    /// Number of registered agents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.read().len()
    }

    /// Whether no agents are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.read().is_empty()
    }

    /// Whether an agent with the given name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.agents.read().contains_key(name)
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
