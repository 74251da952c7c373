//! Sleep spot tool - overnight stop suggestion

use crate::error::{Error, Result};
use crate::registry::{Tool, ToolDefinition};
use serde_json::json;

/// Tool that suggests a place to sleep at the end of a riding day.
///
/// Stubbed: always a campground named after the location.
pub struct SleepSpotTool {
    definition: ToolDefinition,
}

impl SleepSpotTool {
    /// Create a new sleep spot tool
    #[must_use]
    pub fn new() -> Self {
        let definition = ToolDefinition::new(
            "suggest_sleep_spot",
            "Suggest a place to sleep at the end of the day",
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

impl Default for SleepSpotTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for SleepSpotTool {
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
            "type": "campground",
            "name": format!("Camping {}", location),
            "price_eur": 15,
            "has_showers": true
        }))
    }
}
