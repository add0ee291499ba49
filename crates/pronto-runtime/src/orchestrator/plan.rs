//! Routing and execution planning.
//!
//! A [`RoutingTable`] maps each intent to the specialists that can serve it;
//! [`ExecutionPlan`] freezes one request's routing decision before dispatch.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::OrchestrationError;
use crate::orchestrator::intent::IntentType;

/// Flat per-step time estimate used for plan cost reporting.
pub const STEP_ESTIMATE_MS: u64 = 2_000;

/// Default specialists for an intent.
#[must_use]
pub fn default_agents(intent: IntentType) -> Vec<String> {
    let names: &[&str] = match intent {
        IntentType::DataQuery => &["data", "process"],
        IntentType::InsightRequest => &["process", "quality", "delivery"],
        IntentType::ForecastRequest => &["forecast", "staff"],
        IntentType::ActionRequest => &["communication"],
        IntentType::AlertCheck => &["process", "quality", "delivery"],
        IntentType::Configuration => &["data"],
        IntentType::General => &["data"],
    };
    names.iter().map(|n| (*n).to_owned()).collect()
}

/// Intent-to-specialists routing table.
///
/// An instance value rather than a global so deployments can re-route without
/// touching classification.
#[derive(Clone, Debug)]
pub struct RoutingTable {
    routes: HashMap<IntentType, Vec<String>>,
}

impl RoutingTable {
    /// Specialists routed for the given intent.
    #[must_use]
    pub fn agents_for(&self, intent: IntentType) -> Vec<String> {
        self.routes.get(&intent).cloned().unwrap_or_default()
    }

    /// Replace the route for one intent.
    pub fn set(&mut self, intent: IntentType, agents: Vec<String>) {
        let _ = self.routes.insert(intent, agents);
    }
}

impl Default for RoutingTable {
    fn default() -> Self {
        let routes = IntentType::ALL
            .into_iter()
            .map(|intent| (intent, default_agents(intent)))
            .collect();
        Self { routes }
    }
}

/// One dispatch slot in a plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    /// Specialist to dispatch.
    pub agent: String,
    /// Zero-based position in the plan. Result order follows this.
    pub order: usize,
}

/// Frozen routing decision for one request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExecutionPlan {
    /// Intent the plan was built for.
    pub intent: IntentType,
    /// Specialists to dispatch, in plan order.
    pub agents_needed: Vec<String>,
    /// Ordered dispatch slots.
    pub steps: Vec<PlanStep>,
    /// Whether the slots run concurrently.
    pub parallel_execution: bool,
    /// Flat cost estimate for reporting.
    pub estimated_ms: u64,
}

impl ExecutionPlan {
    /// Build a plan from the routing table.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::Planning`] when the table routes no
    /// specialists for the intent.
    pub fn build(intent: IntentType, routes: &RoutingTable) -> Result<Self, OrchestrationError> {
        let agents_needed = routes.agents_for(intent);
        if agents_needed.is_empty() {
            return Err(OrchestrationError::Planning(format!(
                "no agents routed for intent `{intent}`"
            )));
        }
        let steps = agents_needed
            .iter()
            .enumerate()
            .map(|(order, agent)| PlanStep {
                agent: agent.clone(),
                order,
            })
            .collect();
        let parallel_execution = agents_needed.len() > 1;
        let estimated_ms = u64::try_from(agents_needed.len()).unwrap_or(u64::MAX) * STEP_ESTIMATE_MS;
        Ok(Self {
            intent,
            agents_needed,
            steps,
            parallel_execution,
            estimated_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn default_table_routes_every_intent() {
        let table = RoutingTable::default();
        for intent in IntentType::ALL {
            assert!(!table.agents_for(intent).is_empty(), "{intent} unrouted");
        }
    }

    #[test]
    fn multi_agent_intent_plans_parallel() {
        let plan =
            ExecutionPlan::build(IntentType::InsightRequest, &RoutingTable::default()).unwrap();
        assert_eq!(plan.agents_needed, vec!["process", "quality", "delivery"]);
        assert!(plan.parallel_execution);
        assert_eq!(plan.estimated_ms, 3 * STEP_ESTIMATE_MS);
        let orders: Vec<usize> = plan.steps.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn single_agent_intent_plans_sequential() {
        let plan =
            ExecutionPlan::build(IntentType::ActionRequest, &RoutingTable::default()).unwrap();
        assert_eq!(plan.agents_needed, vec!["communication"]);
        assert!(!plan.parallel_execution);
    }

    #[test]
    fn empty_route_is_planning_error() {
        let mut table = RoutingTable::default();
        table.set(IntentType::General, Vec::new());
        let err = ExecutionPlan::build(IntentType::General, &table).unwrap_err();
        assert_matches!(err, OrchestrationError::Planning(_));
    }

    #[test]
    fn overridden_route_is_used() {
        let mut table = RoutingTable::default();
        table.set(IntentType::DataQuery, vec!["data".into()]);
        let plan = ExecutionPlan::build(IntentType::DataQuery, &table).unwrap();
        assert_eq!(plan.agents_needed, vec!["data"]);
        assert!(!plan.parallel_execution);
    }
}
