//! Orchestration result types

use crate::plan::{ExecutionPlan, PlanStep};
use serde::Serialize;
use uuid::Uuid;

/// Final status of an orchestration call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrchestrationStatus {
    /// Every step completed normally
    Completed,
    /// The call finished but at least one step was recorded as degraded
    PartialSuccess,
    /// The caller cancelled the call before the plan finished
    Cancelled,
}

/// Result of a single executed plan step
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    /// 0-based position in the plan
    pub step_index: usize,
    /// The step that was executed
    pub step: PlanStep,
    /// The handler's answer text
    pub answer: String,
    /// Whether the handler failed and this answer is a failure notice
    pub degraded: bool,
    /// Step duration in milliseconds
    pub duration_ms: u64,
}

/// Result of one orchestration call
///
/// The plan and per-step results are exposed for observability; callers
/// that only want the answer can ignore them. Nothing here outlives the
/// call — there is no cross-call persistence.
#[derive(Debug, Clone, Serialize)]
pub struct OrchestrationResult {
    /// Unique identifier for this call
    pub execution_id: Uuid,
    /// The synthesized final answer
    pub answer: String,
    /// Final status
    pub status: OrchestrationStatus,
    /// The validated plan that was executed
    pub plan: ExecutionPlan,
    /// Ordered per-step results (may be shorter than the plan if cancelled)
    pub results: Vec<StepResult>,
}
