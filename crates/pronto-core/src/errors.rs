//! Tool failure taxonomy.
//!
//! Every tool invocation resolves to a value or one of these typed failures;
//! an unexpected error never escapes a tool call untranslated.

use thiserror::Error;

/// Failure of a single bounded tool invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Execution exceeded the tool's declared deadline.
    #[error("tool `{tool}` timed out after {timeout_ms}ms")]
    Timeout {
        /// Name of the tool that timed out.
        tool: String,
        /// The deadline that was exceeded, in milliseconds.
        timeout_ms: u64,
    },

    /// The wrapped capability failed.
    #[error("tool `{tool}` failed: {message}")]
    Execution {
        /// Name of the failing tool.
        tool: String,
        /// Underlying failure description.
        message: String,
    },

    /// The requested tool name is not registered with the agent.
    #[error("unknown tool: {0}")]
    Unknown(String),
}

impl ToolError {
    /// Execution failure for `tool` with the given message.
    #[must_use]
    pub fn execution(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Execution {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Whether this failure was a deadline overrun.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_display_names_tool_and_deadline() {
        let err = ToolError::Timeout {
            tool: "query_orders".into(),
            timeout_ms: 250,
        };
        assert_eq!(err.to_string(), "tool `query_orders` timed out after 250ms");
        assert!(err.is_timeout());
    }

    #[test]
    fn execution_display() {
        let err = ToolError::execution("export", "disk full");
        assert_eq!(err.to_string(), "tool `export` failed: disk full");
        assert!(!err.is_timeout());
    }

    #[test]
    fn unknown_display() {
        let err = ToolError::Unknown("nope".into());
        assert_eq!(err.to_string(), "unknown tool: nope");
    }
}
