//! Weather tool - short forecast for a location

use crate::error::{Error, Result};
use crate::registry::{Tool, ToolDefinition};
use serde_json::json;

/// Tool that returns a short weather forecast for a location.
///
/// Stubbed: static forecast data.
pub struct WeatherForecastTool {
    definition: ToolDefinition,
}

impl WeatherForecastTool {
    /// Create a new weather tool
    #[must_use]
    pub fn new() -> Self {
        let definition = ToolDefinition::new(
            "get_weather_forecast",
            "Get a 3-day weather forecast for a location",
            json!({
                "type": "object",
                "properties": {
                    "location": {"type": "string"}
                },
                "required": ["location"]
            }),
        );

        Self { definition }
    }
}

impl Default for WeatherForecastTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for WeatherForecastTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(
        &self,
        args: serde_json::Map<String, serde_json::Value>,
    ) -> Result<serde_json::Value> {
        let location = args
            .get("location")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::InvalidInput("'location' must be a string".to_string()))?;

        Ok(json!({
            "location": location,
            "forecast": [
                {"day": "Tomorrow", "condition": "sunny", "high": 22, "low": 14},
                {"day": "Day After", "condition": "cloudy", "high": 19, "low": 13}
            ]
        }))
    }
}
