//! Wayfarer Core - Plan Execution Engine
//!
//! This crate provides the execution engine for Wayfarer:
//! - Plan: validated plan model parsed from raw oracle text
//! - Context: typed execution context and placeholder resolution
//! - Executor: sequential per-step execution with isolated failures
//! - Planner: planning-prompt construction and the single oracle call
//! - Orchestrator: request-level driver producing the execution report

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod context;
pub mod error;
pub mod executor;
pub mod orchestrator;
pub mod plan;
pub mod planner;

pub use context::{resolve_args, resolve_value, ContextKey, ExecutionContext};
pub use error::{Error, Result};
pub use executor::{StepExecutor, StepResult};
pub use orchestrator::{ExecutionReport, Orchestrator};
pub use plan::{Plan, Step};
pub use planner::{Planner, PlannerConfig};
