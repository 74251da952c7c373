//! JSON-line transport over stdin/stdout
//!
//! One request per line, one response per line. Only the `run` and `tools`
//! methods exist; the caller always receives a JSON object, never a broken
//! stream, whatever happened to the individual request.

use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};
use wayfarer_core::{Error as CoreError, ExecutionReport, Orchestrator};
use wayfarer_llm::Message;

#[derive(Debug, Deserialize)]
struct Request {
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RunParams {
    prompt: String,
    #[serde(default)]
    state: Value,
    #[serde(default)]
    memory: Vec<Message>,
}

/// Serve requests from stdin until EOF
pub async fn serve(orchestrator: Orchestrator) -> Result<()> {
    info!(provider = orchestrator.provider_name(), "Serving requests on stdin");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_line(&orchestrator, &line).await;
        let mut payload = serde_json::to_string(&response)?;
        payload.push('\n');
        stdout.write_all(payload.as_bytes()).await?;
        stdout.flush().await?;
    }

    Ok(())
}

async fn handle_line(orchestrator: &Orchestrator, line: &str) -> Value {
    let request: Request = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => return json!({"error": format!("Invalid JSON: {}", e)}),
    };

    match request.method.as_str() {
        "run" => handle_run(orchestrator, request.params).await,
        "tools" => tools_response(orchestrator),
        method => json!({"error": "Unknown method", "method": method}),
    }
}

async fn handle_run(orchestrator: &Orchestrator, params: Value) -> Value {
    let params: RunParams = match serde_json::from_value(params) {
        Ok(params) => params,
        Err(e) => return json!({"error": format!("Invalid params: {}", e)}),
    };

    if !params.state.is_null() {
        debug!("Client state accepted but not used during execution");
    }

    run_response(orchestrator.run(&params.prompt, &params.memory).await)
}

fn tools_response(orchestrator: &Orchestrator) -> Value {
    let mut definitions = orchestrator.registry().list_definitions();
    definitions.sort_by(|a, b| a.name.cmp(&b.name));
    json!({"tools": definitions})
}

/// Render a run outcome in the wire shape: the report on success, an error
/// payload carrying the raw oracle text on plan-parse failure.
pub(crate) fn run_response(result: wayfarer_core::Result<ExecutionReport>) -> Value {
    match result {
        Ok(report) => serde_json::to_value(&report)
            .unwrap_or_else(|e| json!({"error": format!("Internal error: {}", e)})),
        Err(CoreError::PlanParse { raw, cause }) => json!({
            "error": "Failed to parse plan",
            "plan_text": raw,
            "exception": cause,
        }),
        Err(e) => json!({"error": e.to_string()}),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use wayfarer_core::PlannerConfig;
    use wayfarer_llm::MockProvider;
    use wayfarer_tools::{register_builtins, ToolRegistry};

    fn mock_orchestrator(provider: Arc<MockProvider>) -> Orchestrator {
        let mut registry = ToolRegistry::new();
        register_builtins(&mut registry).unwrap();
        Orchestrator::new(provider, Arc::new(registry), PlannerConfig::default())
    }

    #[test]
    fn test_run_response_parse_failure_shape() {
        let result = Err(CoreError::PlanParse {
            raw: "not json".to_string(),
            cause: "expected value at line 1".to_string(),
        });

        let response = run_response(result);
        assert_eq!(response["error"], "Failed to parse plan");
        assert_eq!(response["plan_text"], "not json");
        assert!(response["exception"].as_str().unwrap().contains("expected value"));
        assert!(response.get("results").is_none());
    }

    #[tokio::test]
    async fn test_handle_line_rejects_invalid_json() {
        let orchestrator = mock_orchestrator(Arc::new(MockProvider::new()));
        let response = handle_line(&orchestrator, "{nope").await;
        assert!(response["error"].as_str().unwrap().starts_with("Invalid JSON:"));
    }

    #[tokio::test]
    async fn test_handle_line_rejects_unknown_method() {
        let orchestrator = mock_orchestrator(Arc::new(MockProvider::new()));
        let response = handle_line(&orchestrator, r#"{"method": "teleport"}"#).await;
        assert_eq!(response["error"], "Unknown method");
        assert_eq!(response["method"], "teleport");
    }

    #[tokio::test]
    async fn test_handle_line_run_round_trip() {
        let provider = Arc::new(MockProvider::new());
        provider.add_response(
            r#"{"steps": [{"tool": "get_weather_forecast", "args": {"location": "Delft"}}]}"#,
        );
        let orchestrator = mock_orchestrator(provider);

        let response = handle_line(
            &orchestrator,
            r#"{"method": "run", "params": {"prompt": "weather in Delft", "memory": []}}"#,
        )
        .await;

        assert_eq!(response["results"][0]["tool"], "get_weather_forecast");
        assert_eq!(response["results"][0]["input"]["location"], "Delft");
        assert_eq!(response["plan"][0]["tool"], "get_weather_forecast");
    }

    #[tokio::test]
    async fn test_tools_method_lists_definitions() {
        let orchestrator = mock_orchestrator(Arc::new(MockProvider::new()));
        let response = handle_line(&orchestrator, r#"{"method": "tools"}"#).await;

        let tools = response["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 4);
        assert_eq!(tools[0]["name"], "find_activities");
        assert!(tools[0]["parameters"]["required"].is_array());
    }
}
