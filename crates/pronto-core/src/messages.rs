//! Conversation message types shared by every agent.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─────────────────────────────────────────────────────────────────────────────
// Message role
// ─────────────────────────────────────────────────────────────────────────────

/// Role of a message in an agent's conversation history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// System instructions.
    System,
    /// Caller input.
    User,
    /// Agent output.
    Assistant,
    /// Tool invocation result.
    Tool,
}

impl MessageRole {
    /// Wire-format string for this role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Message
// ─────────────────────────────────────────────────────────────────────────────

/// A single entry in an agent's conversation history.
///
/// Owned by the [`AgentMemory`](crate::memory::AgentMemory) that appended it;
/// immutable once stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Who produced the message.
    pub role: MessageRole,
    /// Message body.
    pub content: String,
    /// RFC 3339 creation time.
    pub timestamp: String,
    /// Arbitrary per-message metadata.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, Value>,
    /// Tool calls requested in this message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<Value>,
    /// Results of tool calls referenced by this message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_results: Vec<Value>,
}

impl Message {
    /// Create a message stamped with the current time.
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            metadata: serde_json::Map::new(),
            tool_calls: Vec::new(),
            tool_results: Vec::new(),
        }
    }

    /// Attach metadata to the message.
    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
