//! CLI module for Scout
//!
//! Commands:
//! - `ask`: route one question through the orchestrator
//! - `intents`: list registered intents and their descriptions
//! - `demo`: run the canned demo query set

use anyhow::Context;
use clap::{Parser, Subcommand};
use scout_core::{
    build_default_registry, Orchestrator, OrchestratorConfig, OrchestrationResult,
    PlannerConfig, ReasoningPlanner,
};
use scout_llm::{OpenAiCompatConfig, OpenAiCompatProvider, ReasoningProvider};
use scout_tools::RunnerConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::settings::Settings;

/// Scout CLI
#[derive(Parser, Debug)]
#[command(name = "scout")]
#[command(about = "Intent-routed question orchestrator")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a single question
    Ask {
        /// The question to route
        question: String,
        /// Also print the execution plan and per-step results
        #[arg(long)]
        verbose: bool,
    },
    /// List registered intents
    Intents,
    /// Run the canned demo query set against the configured backend
    Demo,
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Ask { question, verbose }) => ask(&question, verbose).await,
        Some(Commands::Intents) => intents(),
        Some(Commands::Demo) => demo().await,
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}

fn build_provider(settings: &Settings) -> anyhow::Result<Arc<dyn ReasoningProvider>> {
    let mut config = match &settings.backend.api_key {
        Some(key) => OpenAiCompatConfig::new(key.clone()),
        None => OpenAiCompatConfig::from_env().context(
            "no reasoning backend configured; set SCOUT_API_KEY or backend.api_key in config/default.toml",
        )?,
    };

    if let Some(base_url) = &settings.backend.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(model) = &settings.backend.model {
        config = config.with_model(model.clone());
    }
    config = config.with_timeout(Duration::from_secs(settings.backend.request_timeout_secs));

    Ok(Arc::new(OpenAiCompatProvider::new(config)))
}

fn build_orchestrator(settings: &Settings) -> anyhow::Result<Orchestrator> {
    let provider = build_provider(settings)?;

    let runner_config = RunnerConfig::new(Duration::from_secs(
        settings.orchestrator.tool_timeout_secs,
    ));
    let registry = Arc::new(build_default_registry(provider.clone(), runner_config));
    let planner = Arc::new(ReasoningPlanner::new(provider, PlannerConfig::default()));

    let config = OrchestratorConfig::new()
        .with_planner_timeout(Duration::from_secs(
            settings.orchestrator.planner_timeout_secs,
        ))
        .with_step_timeout(Duration::from_secs(settings.orchestrator.step_timeout_secs));

    Ok(Orchestrator::new(planner, registry, config))
}

fn print_result(result: &OrchestrationResult, verbose: bool) {
    if verbose {
        println!("Plan:");
        for (index, step) in result.plan.steps().iter().enumerate() {
            println!("  Step {}: {}", index, step);
        }
        println!();
        for step_result in &result.results {
            if step_result.degraded {
                println!(
                    "  (step {} degraded after {}ms)",
                    step_result.step_index, step_result.duration_ms
                );
            }
        }
    }
    println!("{}", result.answer);
}

async fn ask(question: &str, verbose: bool) -> anyhow::Result<()> {
    let settings = Settings::load()?;
    let orchestrator = build_orchestrator(&settings)?;

    info!(question = %question, "Routing question");
    let result = orchestrator.run(question).await?;
    print_result(&result, verbose);
    Ok(())
}

fn intents() -> anyhow::Result<()> {
    let settings = Settings::load()?;

    // Listing needs only names and descriptions, so an unconfigured backend
    // is fine here.
    let provider = build_provider(&settings).unwrap_or_else(|_| {
        Arc::new(OpenAiCompatProvider::new(OpenAiCompatConfig::new(
            String::new(),
        )))
    });
    let registry = build_default_registry(provider, RunnerConfig::default());

    println!("{}", registry.capability_descriptions());
    println!("\nDefault intent: {}", registry.default_intent());
    Ok(())
}

/// The demo queries exercise every intent plus multi-step combinations.
const DEMO_QUERIES: &[&str] = &[
    "What tickets mention Safari?",
    "Get details for ticket SHOP-2847",
    "How are mobile conversions trending?",
    "Find P0 tickets and get details for the most critical one",
    "Are there checkout issues and are conversion rates down?",
    "Get details for SHOP-3001 and check if mobile metrics are affected",
    "Find Safari-related tickets, get details for SHOP-2847, and check Safari user metrics",
];

async fn demo() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    let orchestrator = build_orchestrator(&settings)?;

    for (index, question) in DEMO_QUERIES.iter().enumerate() {
        println!("{}", "=".repeat(72));
        println!("Query {}: {}", index + 1, question);
        println!("{}", "=".repeat(72));

        let result = orchestrator.run(question).await?;
        print_result(&result, true);
        println!();
    }

    Ok(())
}
