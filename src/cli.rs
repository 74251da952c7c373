//! CLI definition and command dispatch

use crate::server;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use wayfarer_core::{Orchestrator, PlannerConfig};
use wayfarer_llm::OpenAiProvider;
use wayfarer_tools::{register_builtins, ToolRegistry};

/// Wayfarer command line interface
#[derive(Parser)]
#[command(
    name = "wayfarer",
    version,
    about = "Trip-planning agent that executes oracle-generated tool plans"
)]
pub struct Cli {
    /// Subcommand to run; defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Serve JSON-line requests on stdin/stdout
    Serve,
    /// Plan and execute a single goal, then print the report
    Run {
        /// Natural-language goal
        #[arg(long)]
        prompt: String,
    },
    /// Print the registered tool definitions
    Tools,
}

/// Dispatch a parsed command line
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => server::serve(build_orchestrator()?).await,
        Command::Run { prompt } => {
            let orchestrator = build_orchestrator()?;
            let response = server::run_response(orchestrator.run(&prompt, &[]).await);
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Command::Tools => {
            let registry = build_registry()?;
            let mut definitions = registry.list_definitions();
            definitions.sort_by(|a, b| a.name.cmp(&b.name));
            println!("{}", serde_json::to_string_pretty(&definitions)?);
            Ok(())
        }
    }
}

fn build_registry() -> Result<Arc<ToolRegistry>> {
    let mut registry = ToolRegistry::new();
    register_builtins(&mut registry).context("registering built-in tools")?;
    Ok(Arc::new(registry))
}

fn build_orchestrator() -> Result<Orchestrator> {
    let provider = OpenAiProvider::from_env().context("configuring the planning oracle")?;
    Ok(Orchestrator::new(
        Arc::new(provider),
        build_registry()?,
        PlannerConfig::default(),
    ))
}
