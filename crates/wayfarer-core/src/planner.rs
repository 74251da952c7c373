//! Planner - natural-language goal to raw plan text
//!
//! Builds the planning prompt (tool signatures rendered from the registry
//! plus one worked example), appends it to the conversation history, and
//! makes the single oracle call. No retry: transport-level policies belong
//! to the caller.

use crate::error::{Error, Result};
use std::sync::Arc;
use tracing::{debug, instrument};
use wayfarer_llm::{CompletionRequest, LlmProvider, Message};
use wayfarer_tools::{ToolDefinition, ToolRegistry};

/// Planning prompt template. `{tools}` and `{goal}` are filled per request.
const PLANNING_PROMPT_TEMPLATE: &str = r#"You are a trip planner. Based on the following user request, output a JSON plan of tool calls to achieve the goal.
Each step must include all required arguments for the tool.
Available tools:
{tools}

Example plan:
{
  "steps": [
    {"tool": "get_route_day", "args": {"start": "Groningen", "distance_km": 70}},
    {"tool": "get_weather_forecast", "args": {"location": "<get_route_day.end>"}},
    {"tool": "suggest_sleep_spot", "args": {"location": "<get_route_day.end>"}},
    {"tool": "find_activities", "args": {"location": "<get_route_day.end>", "preferences": ["nature"]}}
  ]
}

A step argument may reference an earlier step's output with a <tool_name.field> or <stepN.field> placeholder.

User request: {goal}
Output only valid JSON with a 'steps' list."#;

/// Configuration for the planner
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Model override; the provider default is used when unset
    pub model: Option<String>,
    /// Temperature for generation
    pub temperature: f32,
    /// Maximum tokens for the plan
    pub max_tokens: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            model: None,
            temperature: 0.2,
            max_tokens: 512,
        }
    }
}

impl PlannerConfig {
    /// Create a new configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the token budget for the plan
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Planner for converting a goal into raw plan text via the oracle
pub struct Planner {
    provider: Arc<dyn LlmProvider>,
    config: PlannerConfig,
}

impl Planner {
    /// Create a new planner
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, config: PlannerConfig) -> Self {
        Self { provider, config }
    }

    /// Create with default configuration
    #[must_use]
    pub fn with_defaults(provider: Arc<dyn LlmProvider>) -> Self {
        Self::new(provider, PlannerConfig::default())
    }

    /// Get the underlying LLM provider
    #[must_use]
    pub fn provider(&self) -> &dyn LlmProvider {
        self.provider.as_ref()
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Render the planning prompt for a goal against the registry's tools
    #[must_use]
    pub fn planning_prompt(&self, goal: &str, registry: &ToolRegistry) -> String {
        let mut definitions = registry.list_definitions();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));

        let tools = definitions
            .iter()
            .map(|def| format!("- {}", render_signature(def)))
            .collect::<Vec<_>>()
            .join("\n");

        PLANNING_PROMPT_TEMPLATE
            .replace("{tools}", &tools)
            .replace("{goal}", goal)
    }

    /// Obtain raw plan text for a goal.
    ///
    /// The conversation history is sent as-is, with the planning prompt
    /// appended as one user message.
    #[instrument(skip(self, goal, history, registry), fields(history = history.len()))]
    pub async fn plan(
        &self,
        goal: &str,
        history: &[Message],
        registry: &ToolRegistry,
    ) -> Result<String> {
        let model = self
            .config
            .model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_string());

        let mut messages = history.to_vec();
        messages.push(Message::user(self.planning_prompt(goal, registry)));

        let request = CompletionRequest {
            model,
            messages,
            max_tokens: Some(self.config.max_tokens),
            temperature: Some(self.config.temperature),
            stop: None,
        };

        let response = self.provider.complete(request).await.map_err(Error::Llm)?;
        debug!(model = %response.model, "Received plan text");
        Ok(response.content)
    }
}

/// Human-readable signature line, e.g.
/// `find_activities(location: string, preferences: list of strings)`
fn render_signature(def: &ToolDefinition) -> String {
    let params = def
        .required_params()
        .iter()
        .map(|name| format!("{}: {}", name, render_param_type(def, name)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}({})", def.name, params)
}

fn render_param_type(def: &ToolDefinition, name: &str) -> String {
    let ty = def
        .parameters
        .pointer(&format!("/properties/{}/type", name))
        .and_then(|t| t.as_str())
        .unwrap_or("any");

    if ty == "array" {
        let items = def
            .parameters
            .pointer(&format!("/properties/{}/items/type", name))
            .and_then(|t| t.as_str());
        return match items {
            Some(item_ty) => format!("list of {}s", item_ty),
            None => "list".to_string(),
        };
    }

    ty.to_string()
}
