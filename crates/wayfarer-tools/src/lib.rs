//! Wayfarer Tools - Tool Registry and Built-in Trip Tools
//!
//! This crate provides the tool system for Wayfarer:
//! - Registry: tool registration, discovery, and schema validation
//! - Builtins: the trip tools (route, weather, sleep spot, activities)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod builtins;
pub mod error;
pub mod registry;

pub use builtins::register_builtins;
pub use error::{Error, Result};
pub use registry::{Tool, ToolDefinition, ToolRegistry};
