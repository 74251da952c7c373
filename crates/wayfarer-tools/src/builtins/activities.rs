//! Activities tool - things to do near a location

use crate::error::{Error, Result};
use crate::registry::{Tool, ToolDefinition};
use serde_json::json;

/// Maximum number of recommendations returned
const MAX_RECOMMENDATIONS: usize = 3;

/// Known activities per preference keyword
fn activities_for(preference: &str) -> &'static [&'static str] {
    match preference {
        "nature" => &["bike through a national park", "visit a botanical garden"],
        "historic towns" => &["tour a local castle", "walk old town center"],
        "no big cities" => &["ride through local villages"],
        _ => &[],
    }
}

/// Tool that finds activities near a location based on user preferences.
///
/// Stubbed: fixed preference-to-activity table; unknown preferences simply
/// contribute nothing.
pub struct FindActivitiesTool {
    definition: ToolDefinition,
}

impl FindActivitiesTool {
    /// Create a new activities tool
    #[must_use]
    pub fn new() -> Self {
        let definition = ToolDefinition::new(
            "find_activities",
            "Find activities near a location based on user preferences",
            json!({
                "type": "object",
                "properties": {
                    "location": {"type": "string"},
                    "preferences": {
                        "type": "array",
                        "items": {"type": "string"}
                    }
                },
                "required": ["location", "preferences"]
            }),
        );

        Self { definition }
    }
}

impl Default for FindActivitiesTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for FindActivitiesTool {
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

        let preferences = args
            .get("preferences")
            .and_then(|v| v.as_array())
            .ok_or_else(|| Error::InvalidInput("'preferences' must be a list".to_string()))?;

        let recommended: Vec<&str> = preferences
            .iter()
            .filter_map(|p| p.as_str())
            .flat_map(|p| activities_for(p).iter().copied())
            .take(MAX_RECOMMENDATIONS)
            .collect();

        Ok(json!({
            "location": location,
            "recommended": recommended
        }))
    }
}
