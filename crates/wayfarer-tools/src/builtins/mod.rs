//! Builtins - built-in trip tools for Wayfarer
//!
//! This module provides the core set of built-in tools:
//! - `get_route_day`: route segment for one riding day
//! - `get_weather_forecast`: short weather forecast for a location
//! - `suggest_sleep_spot`: overnight stop suggestion
//! - `find_activities`: activities near a location by preference

mod activities;
mod routing;
mod sleep_spots;
mod weather;

pub use activities::FindActivitiesTool;
pub use routing::RouteDayTool;
pub use sleep_spots::SleepSpotTool;
pub use weather::WeatherForecastTool;

use crate::error::Result;
use crate::registry::ToolRegistry;
use std::sync::Arc;

/// Register all built-in tools with the registry
///
/// # Errors
/// Returns an error if any built-in declares a malformed parameter schema
pub fn register_builtins(registry: &mut ToolRegistry) -> Result<()> {
    registry.register(Arc::new(RouteDayTool::new()))?;
    registry.register(Arc::new(WeatherForecastTool::new()))?;
    registry.register(Arc::new(SleepSpotTool::new()))?;
    registry.register(Arc::new(FindActivitiesTool::new()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_builtins() {
        let mut registry = ToolRegistry::new();
        register_builtins(&mut registry).unwrap();

        assert!(registry.has("get_route_day"));
        assert!(registry.has("get_weather_forecast"));
        assert!(registry.has("suggest_sleep_spot"));
        assert!(registry.has("find_activities"));
        assert_eq!(registry.len(), 4);
    }
}
