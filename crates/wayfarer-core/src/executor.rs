//! Step executor - sequential plan execution with isolated failures
//!
//! Every step failure is recorded as data and never aborts the plan: later
//! steps that do not depend on a failed step still run. A later step that
//! references a failed step's output keeps the literal placeholder and then
//! fails its own completeness check, so dependency chains degrade without
//! special-casing.

use crate::context::{resolve_args, ExecutionContext};
use crate::plan::{Plan, Step};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use wayfarer_tools::ToolRegistry;

/// Outcome of one step, index-aligned with the plan.
///
/// Success carries `tool`/`input`/`output`; failures carry `tool`/`input`/
/// `error`, except unknown-tool failures which carry only `error`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StepResult {
    /// Tool name, echoed back
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    /// Fully resolved arguments the tool was (or would have been) called with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Map<String, Value>>,
    /// Tool output on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    /// Failure description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepResult {
    /// Successful step
    #[must_use]
    pub fn success(tool: &str, input: Map<String, Value>, output: Value) -> Self {
        Self {
            tool: Some(tool.to_string()),
            input: Some(input),
            output: Some(output),
            error: None,
        }
    }

    /// Failed step with resolved input echo
    #[must_use]
    pub fn failure(tool: &str, input: Map<String, Value>, error: impl Into<String>) -> Self {
        Self {
            tool: Some(tool.to_string()),
            input: Some(input),
            output: None,
            error: Some(error.into()),
        }
    }

    /// Step naming a tool absent from the registry; no tool/input echo
    #[must_use]
    pub fn unknown_tool(name: &str) -> Self {
        Self {
            error: Some(format!("Unknown tool: {}", name)),
            ..Self::default()
        }
    }

    /// Whether the step succeeded
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Executes plan steps in order against an injected tool registry.
pub struct StepExecutor {
    registry: Arc<ToolRegistry>,
}

impl StepExecutor {
    /// Create a new executor
    #[must_use]
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// Get the registry
    #[must_use]
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Execute every step of a plan in order.
    ///
    /// The returned sequence has the same length and index alignment as the
    /// plan's steps. The context is created here and discarded afterwards.
    #[instrument(skip(self, plan), fields(steps = plan.len()))]
    pub async fn execute_plan(&self, plan: &Plan) -> Vec<StepResult> {
        let mut context = ExecutionContext::new();
        let mut results = Vec::with_capacity(plan.len());

        for (index, step) in plan.steps.iter().enumerate() {
            let result = self.execute_step(index, step, &mut context).await;
            match &result.error {
                Some(error) => warn!(step = index, tool = %step.tool, error = %error, "Step failed"),
                None => debug!(step = index, tool = %step.tool, "Step completed"),
            }
            results.push(result);
        }

        results
    }

    /// Execute one step: resolve references, check the tool exists, check
    /// argument completeness, invoke, and record the output on success.
    async fn execute_step(
        &self,
        index: usize,
        step: &Step,
        context: &mut ExecutionContext,
    ) -> StepResult {
        let resolved = resolve_args(&step.args, context);

        let Some(tool) = self.registry.get(&step.tool) else {
            return StepResult::unknown_tool(&step.tool);
        };

        let missing: Vec<&str> = tool
            .definition()
            .required_params()
            .into_iter()
            .filter(|name| !resolved.contains_key(*name))
            .collect();
        if !missing.is_empty() {
            return StepResult::failure(
                &step.tool,
                resolved,
                format!("Missing required arguments: {:?}", missing),
            );
        }

        match tool.execute(resolved.clone()).await {
            Ok(output) => {
                context.record(&step.tool, index, output.clone());
                StepResult::success(&step.tool, resolved, output)
            }
            Err(e) => StepResult::failure(&step.tool, resolved, format!("Exception: {}", e)),
        }
    }
}
