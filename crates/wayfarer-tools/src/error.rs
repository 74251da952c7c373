//! Error types for wayfarer-tools

use thiserror::Error;

/// Tool error type
#[derive(Debug, Error)]
pub enum Error {
    /// Tool not found
    #[error("tool not found: {0}")]
    NotFound(String),

    /// Tool execution failed. The payload is the tool's own failure message,
    /// surfaced verbatim in step results.
    #[error("{0}")]
    Execution(String),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Tool definition rejected at registration
    #[error("invalid tool definition for '{tool}': {message}")]
    InvalidDefinition {
        /// Tool name
        tool: String,
        /// What was wrong with the schema
        message: String,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
