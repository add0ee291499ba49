//! Per-request workflow state machine.
//!
//! A [`Workflow`] is created inside each `process` call and dropped with it,
//! so concurrent requests on one orchestrator never share progress state.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stage of one orchestration pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    /// Pass created, nothing started.
    Init,
    /// Classifying the request's intent.
    Classifying,
    /// Building the execution plan.
    Planning,
    /// Dispatching specialists.
    Executing,
    /// Folding specialist results into one answer.
    Synthesizing,
    /// Assembling the final response.
    Responding,
    /// Pass finished successfully.
    Complete,
    /// Pass aborted on a control-logic failure.
    Error,
}

impl WorkflowState {
    /// Whether the pass has finished (no further transitions).
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, WorkflowState::Complete | WorkflowState::Error)
    }

    /// Stable snake_case identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowState::Init => "init",
            WorkflowState::Classifying => "classifying",
            WorkflowState::Planning => "planning",
            WorkflowState::Executing => "executing",
            WorkflowState::Synthesizing => "synthesizing",
            WorkflowState::Responding => "responding",
            WorkflowState::Complete => "complete",
            WorkflowState::Error => "error",
        }
    }
}

impl std::fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress tracker for a single orchestration pass.
#[derive(Debug)]
pub struct Workflow {
    state: WorkflowState,
    started: Instant,
}

impl Workflow {
    /// Fresh pass in [`WorkflowState::Init`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: WorkflowState::Init,
            started: Instant::now(),
        }
    }

    /// Move to the next stage. Terminal states never advance.
    pub fn advance(&mut self, next: WorkflowState) {
        debug_assert!(!self.state.is_terminal(), "advancing a terminal workflow");
        debug!(from = %self.state, to = %next, "workflow transition");
        self.state = next;
    }

    /// Abort the pass.
    pub fn fail(&mut self) {
        self.advance(WorkflowState::Error);
    }

    /// Current stage.
    #[must_use]
    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// Wall-clock time since the pass started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_pass_reaches_complete() {
        let mut wf = Workflow::new();
        assert_eq!(wf.state(), WorkflowState::Init);
        for next in [
            WorkflowState::Classifying,
            WorkflowState::Planning,
            WorkflowState::Executing,
            WorkflowState::Synthesizing,
            WorkflowState::Responding,
            WorkflowState::Complete,
        ] {
            wf.advance(next);
            assert_eq!(wf.state(), next);
        }
        assert!(wf.state().is_terminal());
    }

    #[test]
    fn fail_is_terminal() {
        let mut wf = Workflow::new();
        wf.advance(WorkflowState::Planning);
        wf.fail();
        assert_eq!(wf.state(), WorkflowState::Error);
        assert!(wf.state().is_terminal());
    }

    #[test]
    fn only_complete_and_error_are_terminal() {
        for state in [
            WorkflowState::Init,
            WorkflowState::Classifying,
            WorkflowState::Planning,
            WorkflowState::Executing,
            WorkflowState::Synthesizing,
            WorkflowState::Responding,
        ] {
            assert!(!state.is_terminal(), "{state} should not be terminal");
        }
    }
}
