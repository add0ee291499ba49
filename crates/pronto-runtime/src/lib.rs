//! # pronto-runtime
//!
//! The multi-agent orchestration runtime:
//!
//! - **Agent contract**: [`agent::Agent`] trait + [`agent::AgentCore`] plumbing
//! - **Tools**: [`tool::AgentTool`] trait, [`tool::ToolSet`], bounded
//!   [`tool::execute_tool`] with per-call deadline and blocking off-load
//! - **Registry**: [`registry::AgentRegistry`] mapping names to agents
//! - **Orchestrator**: [`orchestrator::Orchestrator`] — classify intent, plan,
//!   dispatch specialists (parallel or sequential), synthesize one answer
//!
//! ## Crate Position
//!
//! Top of the stack. Depends on `pronto-core` and `pronto-llm`.

#![deny(unsafe_code)]

pub mod agent;
pub mod errors;
pub mod orchestrator;
pub mod registry;
pub mod testutil;
pub mod tool;
pub mod types;
