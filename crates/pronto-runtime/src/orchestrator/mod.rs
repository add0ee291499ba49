//! Request orchestration — classify, plan, dispatch, synthesize.
//!
//! - [`intent`]: keyword-first intent classification with optional LLM assist
//! - [`plan`]: routing table and execution plan construction
//! - [`workflow`]: per-request state machine
//! - [`synthesis`]: folding specialist results into one answer
//! - [`orchestrator`]: the coordinator tying the stages together

pub mod intent;
pub mod orchestrator;
pub mod plan;
pub mod synthesis;
pub mod workflow;

pub use intent::IntentType;
pub use orchestrator::Orchestrator;
pub use plan::{ExecutionPlan, PlanStep, RoutingTable};
pub use workflow::{Workflow, WorkflowState};
