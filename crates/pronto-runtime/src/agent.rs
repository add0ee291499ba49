//! Base agent contract.
//!
//! [`Agent`] is the polymorphic interface every specialist (and the
//! orchestrator itself) implements. [`AgentCore`] carries the plumbing that
//! contract implies — tool set, memory, status — so concrete agents embed one
//! and forward to it instead of re-implementing bookkeeping.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use pronto_core::errors::ToolError;
use pronto_core::memory::AgentMemory;
use pronto_core::messages::{Message, MessageRole};
use pronto_core::response::AgentResponse;
use pronto_core::status::AgentStatus;
use pronto_core::tools::ToolSpec;

use crate::tool::{AgentTool, ToolSet, execute_tool};
use crate::types::ContextMap;

// ─────────────────────────────────────────────────────────────────────────────
// Agent trait
// ─────────────────────────────────────────────────────────────────────────────

/// The contract every agent satisfies.
///
/// `process` never returns an error: failures are reported as
/// `success = false` responses so a misbehaving specialist degrades the
/// answer instead of aborting the request.
#[async_trait::async_trait]
pub trait Agent: Send + Sync {
    /// Name the agent is registered and dispatched under.
    fn name(&self) -> &str;

    /// What this agent specializes in.
    fn description(&self) -> &str;

    /// Advisory liveness status.
    fn status(&self) -> AgentStatus;

    /// Schemas for the tools this agent exposes.
    fn tool_schemas(&self) -> Vec<ToolSpec>;

    /// Handle a request with the given context snapshot.
    async fn process(&self, request: &str, context: &ContextMap) -> AgentResponse;
}

// ─────────────────────────────────────────────────────────────────────────────
// AgentCore
// ─────────────────────────────────────────────────────────────────────────────

/// Shared plumbing embedded by concrete agents: tool set, memory, status.
///
/// All interior state is lock-guarded so an agent can be shared behind an
/// `Arc` and processed concurrently.
pub struct AgentCore {
    name: String,
    description: String,
    tools: RwLock<ToolSet>,
    memory: Mutex<AgentMemory>,
    status: Mutex<AgentStatus>,
}

impl AgentCore {
    /// Core with the default memory bound.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_memory(name, description, AgentMemory::default())
    }

    /// Core with a caller-provided memory.
    #[must_use]
    pub fn with_memory(
        name: impl Into<String>,
        description: impl Into<String>,
        memory: AgentMemory,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            tools: RwLock::new(ToolSet::new()),
            memory: Mutex::new(memory),
            status: Mutex::new(AgentStatus::Idle),
        }
    }

    /// Agent name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Agent description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    // --- tools ---

    /// Register a tool. Last write wins on duplicate names.
    pub fn register_tool(&self, tool: Arc<dyn AgentTool>) {
        debug!(agent = self.name, tool = tool.name(), "registering tool");
        self.tools.write().register(tool);
    }

    /// Schemas for every registered tool.
    #[must_use]
    pub fn tool_schemas(&self) -> Vec<ToolSpec> {
        self.tools.read().schemas()
    }

    /// Sorted names of the registered tools.
    #[must_use]
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.read().names()
    }

    /// Execute a registered tool under its declared bounds.
    ///
    /// An unknown name fails with [`ToolError::Unknown`]; everything else is
    /// delegated to [`execute_tool`].
    pub async fn execute_tool(&self, name: &str, params: Value) -> Result<Value, ToolError> {
        let tool = self
            .tools
            .read()
            .get(name)
            .ok_or_else(|| ToolError::Unknown(name.to_owned()))?;
        execute_tool(tool, params).await
    }

    // --- status ---

    /// Current advisory status.
    #[must_use]
    pub fn status(&self) -> AgentStatus {
        *self.status.lock()
    }

    /// Update the advisory status.
    pub fn set_status(&self, status: AgentStatus) {
        debug!(agent = self.name, status = %status, "status updated");
        *self.status.lock() = status;
    }

    // --- memory ---

    /// Set a context value in this agent's memory.
    pub fn set_context(&self, key: impl Into<String>, value: Value) {
        self.memory.lock().set_context(key, value);
    }

    /// Read a context value from this agent's memory.
    #[must_use]
    pub fn get_context(&self, key: &str) -> Option<Value> {
        self.memory.lock().get_context(key).cloned()
    }

    /// Snapshot of the full context map.
    #[must_use]
    pub fn context_snapshot(&self) -> ContextMap {
        self.memory.lock().context().clone()
    }

    /// Record a request/response pair in conversation history.
    pub fn log_interaction(&self, request: &str, response: &AgentResponse) {
        let mut memory = self.memory.lock();
        memory.add_message(Message::new(MessageRole::User, request));
        memory.add_message(
            Message::new(MessageRole::Assistant, &response.content)
                .with_metadata(response.metadata.clone()),
        );
    }

    /// Trailing conversation summary.
    #[must_use]
    pub fn conversation_summary(&self) -> String {
        self.memory.lock().summary()
    }

    // --- prompts & reporting ---

    /// Derive a system prompt from the registered tools and current context.
    #[must_use]
    pub fn build_system_prompt(&self) -> String {
        let mut capabilities: Vec<String> = self
            .tool_schemas()
            .iter()
            .map(|spec| format!("- {}: {}", spec.name, spec.description))
            .collect();
        capabilities.sort();
        let capabilities = if capabilities.is_empty() {
            "- (no tools registered)".to_owned()
        } else {
            capabilities.join("\n")
        };

        let context = {
            let memory = self.memory.lock();
            serde_json::to_string_pretty(&Value::Object(memory.context().clone()))
                .unwrap_or_else(|_| "{}".to_owned())
        };

        format!(
            "You are {name}, an agent specialized in {description}.\n\n\
             Your capabilities:\n{capabilities}\n\n\
             Current context:\n{context}",
            name = self.name,
            description = self.description,
        )
    }

    /// Snapshot of this agent's bookkeeping state.
    #[must_use]
    pub fn status_report(&self) -> StatusReport {
        let memory = self.memory.lock();
        StatusReport {
            name: self.name.clone(),
            status: self.status(),
            tool_count: self.tools.read().len(),
            message_count: memory.len(),
            context_keys: memory.context().keys().cloned().collect(),
            session_id: memory.session_id().to_owned(),
        }
    }
}

/// Point-in-time report of an agent's bookkeeping state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusReport {
    /// Agent name.
    pub name: String,
    /// Advisory status at capture time.
    pub status: AgentStatus,
    /// Number of registered tools.
    pub tool_count: usize,
    /// Number of messages held in memory.
    pub message_count: usize,
    /// Keys present in the context store.
    pub context_keys: Vec<String>,
    /// Memory session identifier.
    pub session_id: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
