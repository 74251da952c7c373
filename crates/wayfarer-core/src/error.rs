//! Error types for wayfarer-core
//!
//! Only plan-level failures surface as errors; step-level failures are data
//! in the result sequence.

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Oracle output could not be parsed as a plan. Fatal to the whole
    /// request; carries the raw text for diagnosis.
    #[error("failed to parse plan: {cause}")]
    PlanParse {
        /// Raw oracle output
        raw: String,
        /// Parse failure detail
        cause: String,
    },

    /// Planning oracle error
    #[error("llm error: {0}")]
    Llm(#[from] wayfarer_llm::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
