//! The coordinator.
//!
//! [`Orchestrator`] runs the full pass for each request: classify the intent,
//! build an execution plan, dispatch the routed specialists, synthesize their
//! results, and assemble one response. Specialist failures degrade the answer
//! slot-by-slot; only failures of the control logic itself abort a pass.

use std::sync::Arc;
use std::time::Instant;

use serde_json::{Value, json};
use tracing::{debug, error, info, instrument, warn};

use pronto_core::response::AgentResponse;
use pronto_core::status::AgentStatus;
use pronto_core::tools::ToolSpec;
use pronto_llm::{LlmClient, LlmRequest};

use crate::agent::{Agent, AgentCore, StatusReport};
use crate::errors::OrchestrationError;
use crate::orchestrator::intent::{self, IntentType};
use crate::orchestrator::plan::{ExecutionPlan, RoutingTable};
use crate::orchestrator::synthesis;
use crate::orchestrator::workflow::{Workflow, WorkflowState};
use crate::registry::AgentRegistry;
use crate::types::{AgentResult, ContextMap};

/// Summary requests fanned out by [`Orchestrator::gather_summaries`].
const SUMMARY_REQUESTS: [(&str, &str); 5] = [
    ("data", "Get data summary"),
    ("process", "Get bottleneck summary"),
    ("quality", "Get complaint summary"),
    ("delivery", "Get delivery summary"),
    ("forecast", "Get forecast summary"),
];

// ─────────────────────────────────────────────────────────────────────────────
// Orchestrator
// ─────────────────────────────────────────────────────────────────────────────

/// Central coordinator over a registry of specialists.
///
/// Holds no per-request state: each `process` call tracks its own
/// [`Workflow`], so one orchestrator can serve concurrent requests.
pub struct Orchestrator {
    core: AgentCore,
    registry: Arc<AgentRegistry>,
    llm: Arc<dyn LlmClient>,
    routes: RoutingTable,
}

impl Orchestrator {
    /// Orchestrator with the default routing table.
    #[must_use]
    pub fn new(registry: Arc<AgentRegistry>, llm: Arc<dyn LlmClient>) -> Self {
        Self {
            core: AgentCore::new(
                "orchestrator",
                "central coordination of the specialist agents",
            ),
            registry,
            llm,
            routes: RoutingTable::default(),
        }
    }

    /// Replace the routing table.
    #[must_use]
    pub fn with_routes(mut self, routes: RoutingTable) -> Self {
        self.routes = routes;
        self
    }

    /// Run one full orchestration pass.
    ///
    /// Always returns a response: control-logic failures come back as
    /// `success = false` with the error in `content`, never as a panic or a
    /// hung call.
    #[instrument(skip_all, fields(request_len = request.len()))]
    pub async fn process(&self, request: &str, context: Option<ContextMap>) -> AgentResponse {
        self.core.set_status(AgentStatus::Thinking);
        if let Some(context) = context {
            for (key, value) in context {
                self.core.set_context(key, value);
            }
        }

        let mut workflow = Workflow::new();
        let mut response = match self.run(request, &mut workflow).await {
            Ok(response) => {
                workflow.advance(WorkflowState::Complete);
                self.core.set_status(AgentStatus::Completed);
                response
            }
            Err(err) => {
                workflow.fail();
                self.core.set_status(AgentStatus::Error);
                error!(error = %err, "orchestration pass aborted");
                AgentResponse::failure("orchestrator", format!("error processing request: {err}"))
            }
        };

        let elapsed_ms = u64::try_from(workflow.elapsed().as_millis()).unwrap_or(u64::MAX);
        let _ = response
            .metadata
            .insert("execution_time_ms".to_owned(), json!(elapsed_ms));
        self.core.log_interaction(request, &response);
        response
    }

    /// The staged pass body. Any `Err` here aborts the whole request.
    async fn run(
        &self,
        request: &str,
        workflow: &mut Workflow,
    ) -> Result<AgentResponse, OrchestrationError> {
        workflow.advance(WorkflowState::Classifying);
        let intent = self.classify(request).await;
        info!(intent = %intent, "request classified");

        workflow.advance(WorkflowState::Planning);
        let plan = ExecutionPlan::build(intent, &self.routes)?;
        debug!(
            agents = ?plan.agents_needed,
            parallel = plan.parallel_execution,
            "execution plan built"
        );

        workflow.advance(WorkflowState::Executing);
        self.core.set_status(AgentStatus::Executing);
        let results = self.dispatch(request, &plan).await;

        workflow.advance(WorkflowState::Synthesizing);
        let content = synthesis::synthesize(&self.llm, request, &results).await;

        workflow.advance(WorkflowState::Responding);
        Ok(self.assemble(intent, &plan, results, content))
    }

    /// Classify the request, consulting the LLM only when keywords miss.
    async fn classify(&self, request: &str) -> IntentType {
        let keyword_intent = intent::classify(request);
        if keyword_intent != IntentType::General {
            return keyword_intent;
        }
        let prompt = intent::classification_prompt(request);
        match self.llm.generate(LlmRequest::new(prompt)).await {
            Ok(reply) => IntentType::parse(&reply.content).unwrap_or(IntentType::General),
            Err(err) => {
                debug!(error = %err, "llm classification unavailable, keeping general");
                IntentType::General
            }
        }
    }

    /// Dispatch the planned specialists and collect per-slot results.
    ///
    /// Results come back in plan order regardless of completion order. The
    /// sequential path threads each successful step's data into the working
    /// context under the producing agent's name.
    async fn dispatch(&self, request: &str, plan: &ExecutionPlan) -> Vec<AgentResult> {
        let context = self.core.context_snapshot();
        if plan.parallel_execution {
            let futures = plan
                .agents_needed
                .iter()
                .map(|name| self.dispatch_one(name, request, context.clone()));
            futures::future::join_all(futures).await
        } else {
            let mut context = context;
            let mut results = Vec::with_capacity(plan.agents_needed.len());
            for name in &plan.agents_needed {
                let result = self.dispatch_one(name, request, context.clone()).await;
                if result.success {
                    if let Some(data) = &result.data {
                        let _ = context.insert(name.clone(), data.clone());
                    }
                }
                results.push(result);
            }
            results
        }
    }

    /// Dispatch one specialist on its own task so a panic or stall in the
    /// specialist cannot take down the pass.
    async fn dispatch_one(&self, name: &str, request: &str, context: ContextMap) -> AgentResult {
        let Some(agent) = self.registry.get(name) else {
            warn!(agent = name, "dispatch target not registered");
            return AgentResult::failure(name, format!("agent `{name}` not found"));
        };

        let request = request.to_owned();
        let start = Instant::now();
        let handle = tokio::spawn(async move { agent.process(&request, &context).await });
        match handle.await {
            Ok(response) => AgentResult::from_response(name, &response, start.elapsed()),
            Err(join_err) => {
                warn!(agent = name, error = %join_err, "specialist task aborted");
                AgentResult::failure(name, format!("agent `{name}` aborted: {join_err}"))
            }
        }
    }

    /// Build the final response from the pass artifacts.
    fn assemble(
        &self,
        intent: IntentType,
        plan: &ExecutionPlan,
        results: Vec<AgentResult>,
        content: String,
    ) -> AgentResponse {
        let success = results.iter().any(|r| r.success);
        let result_summaries: Vec<Value> = results
            .iter()
            .map(|r| {
                json!({
                    "agent": r.agent_name,
                    "success": r.success,
                    "duration_ms": r.duration_ms,
                })
            })
            .collect();
        let data = json!({
            "intent": intent.as_str(),
            "agents_used": plan.agents_needed,
            "results": result_summaries,
        });

        let mut response = if success {
            AgentResponse::ok("orchestrator", content)
        } else {
            AgentResponse::failure("orchestrator", "all specialist agents failed")
        };
        response = response.with_data(data).with_metadata(
            "parallel_execution".to_owned(),
            json!(plan.parallel_execution),
        );
        response
    }

    /// Fan out fixed summary requests to the core specialists.
    ///
    /// Missing specialists come back as failed slots; order follows the fixed
    /// request list.
    pub async fn gather_summaries(&self) -> Vec<AgentResult> {
        let context = self.core.context_snapshot();
        let futures = SUMMARY_REQUESTS
            .iter()
            .map(|(name, request)| self.dispatch_one(name, request, context.clone()));
        futures::future::join_all(futures).await
    }

    /// Bookkeeping snapshot of the orchestrator itself.
    #[must_use]
    pub fn status_report(&self) -> StatusReport {
        self.core.status_report()
    }

    /// The registry this orchestrator dispatches against.
    #[must_use]
    pub fn registry(&self) -> &Arc<AgentRegistry> {
        &self.registry
    }
}

#[async_trait::async_trait]
impl Agent for Orchestrator {
    fn name(&self) -> &str {
        self.core.name()
    }

    fn description(&self) -> &str {
        self.core.description()
    }

    fn status(&self) -> AgentStatus {
        self.core.status()
    }

    fn tool_schemas(&self) -> Vec<ToolSpec> {
        self.core.tool_schemas()
    }

    async fn process(&self, request: &str, context: &ContextMap) -> AgentResponse {
        Orchestrator::process(self, request, Some(context.clone())).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
