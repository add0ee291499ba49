//! Shared runtime types.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use pronto_core::response::AgentResponse;

/// Key/value context passed into and threaded through a `process` call.
pub type ContextMap = serde_json::Map<String, Value>;

/// Outcome of dispatching one specialist for one request.
///
/// Produced once per dispatched agent per pass; never mutated after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentResult {
    /// Name the specialist was dispatched under.
    pub agent_name: String,
    /// Whether the specialist handled the request.
    pub success: bool,
    /// Structured payload from the specialist's response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Error description for a failed slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall-clock time spent in the specialist, in milliseconds.
    pub duration_ms: u64,
}

impl AgentResult {
    /// Failed slot with no data and zero duration (lookup failures).
    #[must_use]
    pub fn failure(agent_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            success: false,
            data: None,
            error: Some(error.into()),
            duration_ms: 0,
        }
    }

    /// Fold a specialist's response into a per-slot result.
    #[must_use]
    pub fn from_response(agent_name: &str, response: &AgentResponse, duration: Duration) -> Self {
        Self {
            agent_name: agent_name.to_owned(),
            success: response.success,
            data: response.data.clone(),
            error: response.error.clone(),
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        }
    }
}
