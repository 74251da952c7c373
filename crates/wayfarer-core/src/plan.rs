//! Plan model - validated structure of oracle output
//!
//! The oracle returns free text expected to be a JSON object with a `steps`
//! list. Parsing is all-or-nothing: a malformed plan rejects the whole
//! request, there is no partial recovery.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One planned tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// Name of the tool to invoke
    pub tool: String,
    /// Argument mapping; values may contain `<dotted.path>` placeholders
    /// nested anywhere inside strings, lists, or objects
    #[serde(default)]
    pub args: Map<String, Value>,
}

/// An ordered, immutable sequence of steps.
///
/// Order is authoritative: a step may only reference outputs of strictly
/// earlier steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Steps in execution order
    pub steps: Vec<Step>,
}

impl Plan {
    /// Parse raw oracle text into a plan.
    ///
    /// # Errors
    /// Returns [`Error::PlanParse`] carrying the raw text and the parse
    /// cause for any failure: invalid JSON, a non-object top level, a
    /// missing `steps` field, or steps of the wrong shape.
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| Error::PlanParse {
            raw: raw.to_string(),
            cause: e.to_string(),
        })
    }

    /// Number of steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the plan has no steps
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
