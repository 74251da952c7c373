//! Orchestrator - request-level driver
//!
//! Obtains raw plan text from the oracle, validates it, runs the executor
//! over every step in order, and assembles the final report. Only a
//! plan-level parse failure aborts a request; step failures are data in the
//! result sequence.

use crate::error::Result;
use crate::executor::{StepExecutor, StepResult};
use crate::plan::{Plan, Step};
use crate::planner::{Planner, PlannerConfig};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument};
use uuid::Uuid;
use wayfarer_llm::{LlmProvider, Message};
use wayfarer_tools::ToolRegistry;

/// Final report for one request: the parsed plan echoed back plus the
/// index-aligned step results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Unique id for this execution
    pub execution_id: Uuid,
    /// The steps as parsed from the oracle output
    pub plan: Vec<Step>,
    /// One result per step, same order
    pub results: Vec<StepResult>,
    /// Wall time spent planning and executing, in milliseconds
    pub duration_ms: u64,
}

/// Main orchestrator that coordinates planning and execution
pub struct Orchestrator {
    planner: Planner,
    executor: StepExecutor,
    registry: Arc<ToolRegistry>,
}

impl Orchestrator {
    /// Create a new orchestrator
    #[must_use]
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        registry: Arc<ToolRegistry>,
        config: PlannerConfig,
    ) -> Self {
        Self {
            planner: Planner::new(provider, config),
            executor: StepExecutor::new(Arc::clone(&registry)),
            registry,
        }
    }

    /// Get the tool registry
    #[must_use]
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Get the planner
    #[must_use]
    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    /// Get the LLM provider name
    #[must_use]
    pub fn provider_name(&self) -> &str {
        self.planner.provider().name()
    }

    /// Plan and execute one goal.
    ///
    /// # Errors
    /// Returns [`crate::Error::PlanParse`] when the oracle output is not a
    /// valid plan (nothing is executed), or [`crate::Error::Llm`] when the
    /// oracle call itself fails.
    #[instrument(skip(self, goal, history))]
    pub async fn run(&self, goal: &str, history: &[Message]) -> Result<ExecutionReport> {
        let execution_id = Uuid::new_v4();
        let start = Instant::now();

        let raw = self.planner.plan(goal, history, &self.registry).await?;
        let plan = Plan::parse(&raw)?;
        info!(%execution_id, steps = plan.len(), "Executing plan");

        let results = self.executor.execute_plan(&plan).await;
        let succeeded = results.iter().filter(|r| r.is_success()).count();
        let duration_ms = start.elapsed().as_millis() as u64;
        info!(%execution_id, succeeded, total = results.len(), duration_ms, "Plan finished");

        Ok(ExecutionReport {
            execution_id,
            plan: plan.steps,
            results,
            duration_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;
    use wayfarer_llm::MockProvider;
    use wayfarer_tools::register_builtins;

    fn orchestrator_with(provider: Arc<MockProvider>) -> Orchestrator {
        let mut registry = ToolRegistry::new();
        register_builtins(&mut registry).unwrap();
        Orchestrator::new(provider, Arc::new(registry), PlannerConfig::default())
    }

    #[tokio::test]
    async fn test_run_produces_aligned_report() {
        let provider = Arc::new(MockProvider::new());
        provider.add_response(
            r#"{"steps": [
                {"tool": "get_route_day", "args": {"start": "Groningen", "distance_km": 70}},
                {"tool": "get_weather_forecast", "args": {"location": "<get_route_day.end>"}}
            ]}"#,
        );

        let orchestrator = orchestrator_with(provider);
        let report = orchestrator.run("two day trip", &[]).await.unwrap();

        assert_eq!(report.plan.len(), 2);
        assert_eq!(report.results.len(), 2);
        assert!(report.results.iter().all(StepResult::is_success));

        // Step 2's resolved location equals step 1's route end.
        let end = report.results[0].output.as_ref().unwrap()["end"].clone();
        assert_eq!(report.results[1].input.as_ref().unwrap()["location"], end);
    }

    #[tokio::test]
    async fn test_malformed_plan_aborts_without_results() {
        let provider = Arc::new(MockProvider::new());
        provider.add_response("not json");

        let orchestrator = orchestrator_with(provider);
        let err = orchestrator.run("anything", &[]).await.unwrap_err();

        match err {
            Error::PlanParse { raw, .. } => assert_eq!(raw, "not json"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_step_failures_do_not_abort_the_request() {
        let provider = Arc::new(MockProvider::new());
        provider.add_response(
            r#"{"steps": [
                {"tool": "imaginary_tool"},
                {"tool": "find_activities", "args": {"location": "Utrecht"}},
                {"tool": "suggest_sleep_spot", "args": {"location": "Utrecht"}}
            ]}"#,
        );

        let orchestrator = orchestrator_with(provider);
        let report = orchestrator.run("anything", &[]).await.unwrap();

        assert_eq!(report.results.len(), 3);
        assert_eq!(
            report.results[0].error.as_deref(),
            Some("Unknown tool: imaginary_tool")
        );
        assert_eq!(
            report.results[1].error.as_deref(),
            Some(r#"Missing required arguments: ["preferences"]"#)
        );
        assert!(report.results[2].is_success());
    }

    #[tokio::test]
    async fn test_report_serializes_wire_shape() {
        let provider = Arc::new(MockProvider::new());
        provider.add_response(r#"{"steps": [{"tool": "get_weather_forecast", "args": {"location": "Delft"}}]}"#);

        let orchestrator = orchestrator_with(provider);
        let report = orchestrator.run("weather", &[]).await.unwrap();

        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("plan").is_some());
        assert!(value.get("results").is_some());
        assert_eq!(value["results"][0]["tool"], "get_weather_forecast");
        assert_eq!(value["results"][0]["input"]["location"], "Delft");
        // Success results omit the error field entirely.
        assert!(value["results"][0].get("error").is_none());
        assert_eq!(value["plan"][0]["args"], json!({"location": "Delft"}));
    }
}
