//! Route tool - one day's route segment

use crate::error::{Error, Result};
use crate::registry::{Tool, ToolDefinition};
use rand::seq::SliceRandom;
use serde_json::json;

/// Candidate end-of-day towns for the stubbed route generator
const TOWNS: &[&str] = &[
    "Assen",
    "Zwolle",
    "Harderwijk",
    "Amersfoort",
    "Utrecht",
    "Gouda",
    "Delft",
    "Leiden",
    "Haarlem",
    "Den Haag",
];

/// Tool that generates a route segment from a start point and distance.
///
/// Stubbed: picks a pseudo-random destination town rather than calling a
/// routing service.
pub struct RouteDayTool {
    definition: ToolDefinition,
}

impl RouteDayTool {
    /// Create a new route tool
    #[must_use]
    pub fn new() -> Self {
        let definition = ToolDefinition::new(
            "get_route_day",
            "Generate a route segment based on start and distance",
            json!({
                "type": "object",
                "properties": {
                    "start": {"type": "string"},
                    "distance_km": {"type": "integer"}
                },
                "required": ["start", "distance_km"]
            }),
        );

        Self { definition }
    }
}

impl Default for RouteDayTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for RouteDayTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(
        &self,
        args: serde_json::Map<String, serde_json::Value>,
    ) -> Result<serde_json::Value> {
        let start = args
            .get("start")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::InvalidInput("'start' must be a string".to_string()))?;

        let distance_km = args
            .get("distance_km")
            .and_then(|v| v.as_i64())
            .ok_or_else(|| Error::InvalidInput("'distance_km' must be an integer".to_string()))?;

        let end = TOWNS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or("Utrecht");

        Ok(json!({
            "start": start,
            "end": end,
            "distance": distance_km,
            "waypoints": [start, "Countryside", end]
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(start: &str, distance: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        let mut map = serde_json::Map::new();
        map.insert("start".to_string(), json!(start));
        map.insert("distance_km".to_string(), distance);
        map
    }

    #[tokio::test]
    async fn test_route_day_output_shape() {
        let tool = RouteDayTool::new();
        let output = tool.execute(args("Groningen", json!(70))).await.unwrap();

        assert_eq!(output["start"], "Groningen");
        assert_eq!(output["distance"], 70);
        let end = output["end"].as_str().unwrap();
        assert!(TOWNS.contains(&end));

        let waypoints = output["waypoints"].as_array().unwrap();
        assert_eq!(waypoints.len(), 3);
        assert_eq!(waypoints[0], "Groningen");
        assert_eq!(waypoints[2], json!(end));
    }

    #[tokio::test]
    async fn test_route_day_rejects_bad_distance() {
        let tool = RouteDayTool::new();
        let err = tool
            .execute(args("Groningen", json!("seventy")))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("distance_km"));
    }
}
