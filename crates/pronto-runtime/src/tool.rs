//! Tool abstraction — named capabilities with bounded execution.
//!
//! [`AgentTool`] is the trait every capability implements. [`execute_tool`]
//! wraps a call so it always resolves to a value or a typed
//! [`ToolError`] within the tool's declared deadline: async capabilities run
//! under `tokio::time::timeout`, blocking capabilities are off-loaded to the
//! blocking pool so they cannot stall the coordinating task. [`ToolSet`] is
//! the per-agent index of registered tools.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use futures::future::BoxFuture;
use serde_json::Value;
use tracing::{debug, warn};

use pronto_core::errors::ToolError;
use pronto_core::tools::{ExecutionMode, ToolSpec};

// ─────────────────────────────────────────────────────────────────────────────
// AgentTool trait
// ─────────────────────────────────────────────────────────────────────────────

/// A single named capability an agent can invoke.
///
/// Implementations provide the raw call; deadline and off-loading are applied
/// by [`execute_tool`], so `call` bodies stay oblivious to scheduling.
#[async_trait::async_trait]
pub trait AgentTool: Send + Sync {
    /// Tool name (unique within the owning agent).
    fn name(&self) -> &str;

    /// Schema and execution bounds for this tool.
    fn spec(&self) -> ToolSpec;

    /// Invoke the capability with JSON parameters.
    async fn call(&self, params: Value) -> Result<Value, ToolError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Bounded execution
// ─────────────────────────────────────────────────────────────────────────────

/// Execute a tool under its declared deadline and mode.
///
/// Guarantees:
/// - an unbounded call cannot escape the deadline ([`ToolError::Timeout`]);
/// - a blocking capability never runs on the coordinating task;
/// - a panicking capability surfaces as [`ToolError::Execution`], not an
///   unwound request.
pub async fn execute_tool(tool: Arc<dyn AgentTool>, params: Value) -> Result<Value, ToolError> {
    let spec = tool.spec();
    let start = Instant::now();
    debug!(tool = spec.name, mode = ?spec.mode, "tool execution started");

    let outcome = match spec.mode {
        ExecutionMode::Async => {
            match tokio::time::timeout(spec.timeout(), tool.call(params)).await {
                Ok(result) => result,
                Err(_) => Err(ToolError::Timeout {
                    tool: spec.name.clone(),
                    timeout_ms: spec.timeout_ms,
                }),
            }
        }
        ExecutionMode::Blocking => {
            let worker = Arc::clone(&tool);
            let handle =
                tokio::task::spawn_blocking(move || futures::executor::block_on(worker.call(params)));
            match tokio::time::timeout(spec.timeout(), handle).await {
                Ok(Ok(result)) => result,
                Ok(Err(join_err)) => Err(ToolError::execution(&spec.name, join_err.to_string())),
                Err(_) => Err(ToolError::Timeout {
                    tool: spec.name.clone(),
                    timeout_ms: spec.timeout_ms,
                }),
            }
        }
    };

    let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    match &outcome {
        Ok(_) => debug!(tool = spec.name, duration_ms, "tool executed"),
        Err(err) => warn!(tool = spec.name, duration_ms, error = %err, "tool failed"),
    }
    outcome
}

// ─────────────────────────────────────────────────────────────────────────────
// FnTool adapter
// ─────────────────────────────────────────────────────────────────────────────

type ToolFn = dyn Fn(Value) -> BoxFuture<'static, Result<Value, ToolError>> + Send + Sync;

/// Adapter wrapping a closure plus its [`ToolSpec`].
///
/// The common way specialists register capabilities without writing a struct
/// per tool.
pub struct FnTool {
    spec: ToolSpec,
    func: Arc<ToolFn>,
}

impl FnTool {
    /// Wrap an async closure.
    pub fn new<F, Fut>(spec: ToolSpec, func: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ToolError>> + Send + 'static,
    {
        Self {
            spec,
            func: Arc::new(move |params| Box::pin(func(params))),
        }
    }

    /// Wrap a synchronous closure; the spec is forced to blocking mode so the
    /// body is off-loaded at execution time.
    pub fn blocking<F>(mut spec: ToolSpec, func: F) -> Self
    where
        F: Fn(Value) -> Result<Value, ToolError> + Send + Sync + 'static,
    {
        spec.mode = ExecutionMode::Blocking;
        Self {
            spec,
            func: Arc::new(move |params| {
                let result = func(params);
                Box::pin(async move { result })
            }),
        }
    }
}

#[async_trait::async_trait]
impl AgentTool for FnTool {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn spec(&self) -> ToolSpec {
        self.spec.clone()
    }

    async fn call(&self, params: Value) -> Result<Value, ToolError> {
        (self.func)(params).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ToolSet
// ─────────────────────────────────────────────────────────────────────────────

/// Per-agent tool index. Registration is last-write-wins.
pub struct ToolSet {
    tools: HashMap<String, Arc<dyn AgentTool>>,
}

impl ToolSet {
    /// Create an empty tool set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Overwrites any existing tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn AgentTool>) {
        debug!(tool = tool.name(), "tool registered");
        let _ = self.tools.insert(tool.name().to_owned(), tool);
    }

    /// Look up a tool by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn AgentTool>> {
        self.tools.get(name).cloned()
    }

    /// Schemas for every registered tool (arbitrary order).
    #[must_use]
    pub fn schemas(&self) -> Vec<ToolSpec> {
        self.tools.values().map(|t| t.spec()).collect()
    }

    /// All tool names, sorted alphabetically.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether no tools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Whether a tool with the given name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }
}

impl Default for ToolSet {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
