//! Registry - tool registration and discovery
//!
//! This module provides the registry of tools a plan may invoke. Each tool
//! declares a JSON schema for its parameters alongside its entry point; the
//! schema is validated once at registration, never per call. The registry
//! itself performs no argument validation — that is the executor's job.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Tool metadata and parameter schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique tool name
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// JSON schema for parameters. The `required` array is authoritative for
    /// argument-completeness checks, in its declared order.
    pub parameters: serde_json::Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// Required parameter names in declared order.
    ///
    /// Call only after the definition passed [`ToolDefinition::validate`];
    /// a malformed schema yields an empty list here.
    #[must_use]
    pub fn required_params(&self) -> Vec<&str> {
        self.parameters
            .get("required")
            .and_then(|r| r.as_array())
            .map(|names| names.iter().filter_map(|n| n.as_str()).collect())
            .unwrap_or_default()
    }

    /// Check the parameter schema is well-formed.
    ///
    /// The schema must describe an object, expose a `properties` object, and
    /// list `required` names that all appear in `properties`.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| Error::InvalidDefinition {
            tool: self.name.clone(),
            message: message.to_string(),
        };

        let schema = self
            .parameters
            .as_object()
            .ok_or_else(|| invalid("parameter schema must be a JSON object"))?;

        if schema.get("type").and_then(|t| t.as_str()) != Some("object") {
            return Err(invalid("parameter schema must have type 'object'"));
        }

        let properties = schema
            .get("properties")
            .and_then(|p| p.as_object())
            .ok_or_else(|| invalid("parameter schema must declare 'properties'"))?;

        let required = schema
            .get("required")
            .and_then(|r| r.as_array())
            .ok_or_else(|| invalid("parameter schema must declare a 'required' list"))?;

        for name in required {
            let name = name
                .as_str()
                .ok_or_else(|| invalid("'required' entries must be strings"))?;
            if !properties.contains_key(name) {
                return Err(invalid(&format!(
                    "required parameter '{}' missing from 'properties'",
                    name
                )));
            }
        }

        Ok(())
    }
}

/// Trait for tool implementations
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool definition
    fn definition(&self) -> &ToolDefinition;

    /// Execute the tool with the supplied argument mapping
    async fn execute(
        &self,
        args: serde_json::Map<String, serde_json::Value>,
    ) -> Result<serde_json::Value>;
}

/// Registry for managing tools.
///
/// Constructed once at startup, shared read-only afterwards. Passed
/// explicitly (`Arc<ToolRegistry>`) to whatever executes plans, so tests
/// register doubles instead of patching globals.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    definitions: HashMap<String, ToolDefinition>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            definitions: HashMap::new(),
        }
    }

    /// Register a tool, validating its parameter schema.
    ///
    /// # Errors
    /// Returns `Error::InvalidDefinition` if the schema is malformed.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let def = tool.definition();
        def.validate()?;
        let name = def.name.clone();
        debug!(tool = %name, "Registering tool");
        self.definitions.insert(name.clone(), def.clone());
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Get a tool by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Get a tool definition by name
    #[must_use]
    pub fn get_definition(&self, name: &str) -> Option<&ToolDefinition> {
        self.definitions.get(name)
    }

    /// Check if a tool exists
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// List all tool names
    #[must_use]
    pub fn list_names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// List all tool definitions
    #[must_use]
    pub fn list_definitions(&self) -> Vec<&ToolDefinition> {
        self.definitions.values().collect()
    }

    /// Get tool count
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
