//! Advisory per-agent execution status.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Liveness indicator for a single agent.
///
/// Advisory bookkeeping only — never used for scheduling, and independent of
/// the orchestrator's workflow state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// Ready for a request.
    #[default]
    Idle,
    /// Classifying or reasoning about a request.
    Thinking,
    /// Running tools or dispatching work.
    Executing,
    /// Blocked on an external capability.
    Waiting,
    /// Last request failed.
    Error,
    /// Last request finished successfully.
    Completed,
}

impl AgentStatus {
    /// Wire-format string for this status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Thinking => "thinking",
            Self::Executing => "executing",
            Self::Waiting => "waiting",
            Self::Error => "error",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
