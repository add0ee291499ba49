//! Test doubles for orchestration tests.
//!
//! Shipped as a normal module so integration tests under `tests/` can use the
//! same stubs as unit tests.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use pronto_core::response::AgentResponse;
use pronto_core::status::AgentStatus;
use pronto_core::tools::ToolSpec;

use crate::agent::Agent;
use crate::registry::AgentRegistry;
use crate::types::ContextMap;

/// Scripted behavior for a [`StubAgent`].
#[derive(Clone, Debug)]
pub enum StubBehavior {
    /// Succeed immediately with the given data payload.
    Succeed(Value),
    /// Fail immediately with the given error message.
    Fail(String),
    /// Sleep for the given duration, then succeed with the payload.
    Delay(Duration, Value),
    /// Panic inside `process`, exercising dispatch isolation.
    Panic,
}

/// Agent whose `process` outcome is fixed at construction.
pub struct StubAgent {
    name: String,
    description: String,
    behavior: StubBehavior,
}

impl StubAgent {
    /// Stub with a generated description.
    #[must_use]
    pub fn new(name: impl Into<String>, behavior: StubBehavior) -> Self {
        let name = name.into();
        let description = format!("stubbed {name} analysis");
        Self {
            name,
            description,
            behavior,
        }
    }
}

#[async_trait::async_trait]
impl Agent for StubAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn status(&self) -> AgentStatus {
        AgentStatus::Idle
    }

    fn tool_schemas(&self) -> Vec<ToolSpec> {
        vec![ToolSpec::new(
            format!("{}_summary", self.name),
            format!("Summary produced by the {} stub", self.name),
        )]
    }

    async fn process(&self, _request: &str, _context: &ContextMap) -> AgentResponse {
        match &self.behavior {
            StubBehavior::Succeed(data) => {
                AgentResponse::ok(&self.name, format!("{} handled the request", self.name))
                    .with_data(data.clone())
            }
            StubBehavior::Fail(message) => AgentResponse::failure(&self.name, message.clone()),
            StubBehavior::Delay(duration, data) => {
                tokio::time::sleep(*duration).await;
                AgentResponse::ok(&self.name, format!("{} handled the request", self.name))
                    .with_data(data.clone())
            }
            StubBehavior::Panic => panic!("stub agent `{}` panicked", self.name),
        }
    }
}

/// Build a registry from `(name, behavior)` pairs.
#[must_use]
pub fn registry_with(
    agents: impl IntoIterator<Item = (&'static str, StubBehavior)>,
) -> Arc<AgentRegistry> {
    let registry = AgentRegistry::new();
    for (name, behavior) in agents {
        registry.register(Arc::new(StubAgent::new(name, behavior)));
    }
    Arc::new(registry)
}
