//! Scout Core - Orchestration Kernel
//!
//! This crate provides the orchestration logic for Scout:
//! - Plan: the step/plan data model and the validator/repair pass
//! - Registry: the immutable intent-to-handler mapping
//! - Handlers: the capability handler seam and the reasoning-backed handler
//! - Planner: the question decomposition seam and the reasoning-backed planner
//! - Orchestrator: the sequential execution loop with context threading
//! - Event bus: broadcast channel for repair warnings and execution events

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod event_bus;
pub mod handlers;
pub mod intents;
pub mod plan;
pub mod planner;
pub mod registry;

pub mod orchestrator;

pub use error::{Error, Result};
pub use event_bus::{EventBus, OrchestratorEvent};
pub use handlers::{HandlerConfig, IntentHandler, ReasoningHandler};
pub use intents::{build_default_registry, DEFAULT_INTENT};
pub use orchestrator::{
    synthesize, OrchestrationResult, OrchestrationStatus, Orchestrator, OrchestratorConfig,
    StepResult,
};
pub use plan::{validate_plan, ExecutionPlan, PlanRepair, PlanStep, RawPlanStep};
pub use planner::{PlannerConfig, QueryPlanner, ReasoningPlanner};
pub use registry::IntentRegistry;
