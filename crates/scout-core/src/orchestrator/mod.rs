//! Orchestrator - the sequential execution loop
//!
//! Ties the planner, validator, registry, handlers, and synthesizer
//! together for one call: question in, answer plus plan and result log out.
//!
//! # Module Structure
//!
//! - `types`: `StepResult`, `OrchestrationResult`, `OrchestrationStatus`
//! - `config`: `OrchestratorConfig` (planner and step timeouts)
//! - `core`: the `Orchestrator` struct and builder methods
//! - `process`: the execution loop
//! - `synthesize`: final-answer synthesis and context rendering

mod config;
mod core;
mod process;
mod synthesize;
mod types;

#[cfg(test)]
mod tests;

pub use config::OrchestratorConfig;
pub use core::Orchestrator;
pub use synthesize::synthesize;
pub use types::{OrchestrationResult, OrchestrationStatus, StepResult};
