//! Runtime error types.
//!
//! [`OrchestrationError`] covers failures of the orchestrator's own control
//! logic. These are request-fatal: the workflow moves to its error state and
//! the caller receives a `success = false` response. Individual specialist
//! failures are never represented here — they are contained at the dispatch
//! boundary as failed `AgentResult`s.

use thiserror::Error;

/// Failure in the orchestrator's control logic (not an individual specialist).
#[derive(Debug, Error)]
pub enum OrchestrationError {
    /// Intent classification failed.
    #[error("classification failed: {0}")]
    Classification(String),

    /// Execution planning failed.
    #[error("planning failed: {0}")]
    Planning(String),

    /// Result synthesis failed.
    #[error("synthesis failed: {0}")]
    Synthesis(String),
}
