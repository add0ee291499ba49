//! Tool schema types.
//!
//! A [`ToolSpec`] declares a named capability: its parameter schema, required
//! parameters, execution deadline, and whether the underlying implementation
//! is async or blocking. Execution itself lives in `pronto-runtime`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default per-call deadline for a tool.
pub const DEFAULT_TOOL_TIMEOUT_MS: u64 = 30_000;

// ─────────────────────────────────────────────────────────────────────────────
// Parameter schema
// ─────────────────────────────────────────────────────────────────────────────

/// JSON Schema-compatible parameter definition for a tool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolParameterSchema {
    /// Top-level JSON Schema type.
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Property definitions (when type is `object`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<serde_json::Map<String, Value>>,
    /// Required property names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Description of the schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Catch-all for additional JSON Schema properties.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl ToolParameterSchema {
    /// An `object` schema with the given properties and required names.
    #[must_use]
    pub fn object(properties: serde_json::Map<String, Value>, required: Vec<String>) -> Self {
        Self {
            schema_type: "object".into(),
            properties: Some(properties),
            required: if required.is_empty() {
                None
            } else {
                Some(required)
            },
            description: None,
            extra: serde_json::Map::new(),
        }
    }

    /// An empty `object` schema (no parameters).
    #[must_use]
    pub fn empty_object() -> Self {
        Self {
            schema_type: "object".into(),
            properties: None,
            required: None,
            description: None,
            extra: serde_json::Map::new(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Execution mode
// ─────────────────────────────────────────────────────────────────────────────

/// How a tool's underlying capability runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// The capability is async and suspends cooperatively.
    #[default]
    Async,
    /// The capability blocks; it must be off-loaded from the coordinating task.
    Blocking,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tool spec
// ─────────────────────────────────────────────────────────────────────────────

fn default_timeout_ms() -> u64 {
    DEFAULT_TOOL_TIMEOUT_MS
}

/// Declaration of a single named capability.
///
/// Names are unique within their owning agent; re-registering a name replaces
/// the prior definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Tool name (unique within its owning agent).
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON Schema for the tool's parameters.
    pub parameters: ToolParameterSchema,
    /// Per-call deadline in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Whether the capability is async or blocking.
    #[serde(default)]
    pub mode: ExecutionMode,
}

impl ToolSpec {
    /// Spec with no parameters, the default timeout, and async mode.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: ToolParameterSchema::empty_object(),
            timeout_ms: DEFAULT_TOOL_TIMEOUT_MS,
            mode: ExecutionMode::Async,
        }
    }

    /// Replace the parameter schema.
    #[must_use]
    pub fn with_parameters(mut self, parameters: ToolParameterSchema) -> Self {
        self.parameters = parameters;
        self
    }

    /// Set the per-call deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Mark the capability as blocking.
    #[must_use]
    pub fn blocking(mut self) -> Self {
        self.mode = ExecutionMode::Blocking;
        self
    }

    /// The per-call deadline as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Required parameter names, empty when none are declared.
    #[must_use]
    pub fn required(&self) -> &[String] {
        self.parameters.required.as_deref().unwrap_or(&[])
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
