//! Plan data model and the validator/repair pass
//!
//! The planner is an unreliable external collaborator: its output may be
//! empty, name intents that do not exist, or leave subqueries blank.
//! Validation repairs every defect instead of rejecting, so the system is
//! always able to answer. Each repair is reported so operators can observe
//! what the planner got wrong.

use crate::registry::IntentRegistry;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// A raw, untrusted plan step as produced by the planner
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlanStep {
    /// Focused question for this step, if the planner provided one
    #[serde(default)]
    pub subquery: Option<String>,
    /// Intent name, if the planner provided one
    #[serde(default)]
    pub intent: Option<String>,
}

impl RawPlanStep {
    /// Create a raw step with both fields present
    #[must_use]
    pub fn new(subquery: impl Into<String>, intent: impl Into<String>) -> Self {
        Self {
            subquery: Some(subquery.into()),
            intent: Some(intent.into()),
        }
    }
}

/// A validated plan step
///
/// Immutable after validation: the subquery is non-empty and the intent
/// resolves in the registry the plan was validated against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanStep {
    /// Focused question for this step
    pub subquery: String,
    /// Intent name routing the step to a handler
    pub intent: String,
}

impl fmt::Display for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.intent, self.subquery)
    }
}

/// An ordered, validated execution plan
///
/// Insertion order is execution order. Guaranteed non-empty; only
/// [`validate_plan`] constructs one.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionPlan {
    steps: Vec<PlanStep>,
}

impl ExecutionPlan {
    /// The steps, in execution order
    #[must_use]
    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    /// Number of steps (always at least one)
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the plan is empty (never true for a validated plan)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// A repair applied while validating a raw plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanRepair {
    /// The planner named an intent the registry does not know
    UnknownIntent {
        /// Index of the repaired step
        step_index: usize,
        /// The intent the planner asked for
        requested: String,
        /// The default intent substituted for it
        fallback: String,
    },
    /// The planner omitted the intent entirely
    MissingIntent {
        /// Index of the repaired step
        step_index: usize,
        /// The default intent substituted
        fallback: String,
    },
    /// The planner left the subquery blank; the original question was used
    BlankSubquery {
        /// Index of the repaired step
        step_index: usize,
    },
    /// The raw plan was empty; a single fallback step was produced
    EmptyPlan,
}

impl fmt::Display for PlanRepair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownIntent {
                step_index,
                requested,
                fallback,
            } => write!(
                f,
                "step {}: unknown intent '{}', defaulting to '{}'",
                step_index, requested, fallback
            ),
            Self::MissingIntent {
                step_index,
                fallback,
            } => write!(
                f,
                "step {}: missing intent, defaulting to '{}'",
                step_index, fallback
            ),
            Self::BlankSubquery { step_index } => write!(
                f,
                "step {}: blank subquery, using the original question",
                step_index
            ),
            Self::EmptyPlan => write!(f, "empty plan, using single fallback step"),
        }
    }
}

/// Validate and repair a raw plan
///
/// Never fails. The returned plan is non-empty and every step's intent is a
/// key of `registry`; applied repairs are returned alongside it. Intent
/// names are normalized (trimmed, lowercased) before the registry check.
#[must_use]
pub fn validate_plan(
    raw: &[RawPlanStep],
    registry: &IntentRegistry,
    question: &str,
) -> (ExecutionPlan, Vec<PlanRepair>) {
    let default_intent = registry.default_intent();
    let mut steps = Vec::with_capacity(raw.len());
    let mut repairs = Vec::new();

    for (step_index, raw_step) in raw.iter().enumerate() {
        let normalized = raw_step
            .intent
            .as_deref()
            .map(|i| i.trim().to_lowercase())
            .filter(|i| !i.is_empty());

        let intent = match normalized {
            Some(intent) if registry.has(&intent) => intent,
            Some(requested) => {
                let repair = PlanRepair::UnknownIntent {
                    step_index,
                    requested,
                    fallback: default_intent.to_string(),
                };
                warn!(%repair, "Repairing plan step");
                repairs.push(repair);
                default_intent.to_string()
            }
            None => {
                let repair = PlanRepair::MissingIntent {
                    step_index,
                    fallback: default_intent.to_string(),
                };
                warn!(%repair, "Repairing plan step");
                repairs.push(repair);
                default_intent.to_string()
            }
        };

        let subquery = match raw_step.subquery.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => {
                let repair = PlanRepair::BlankSubquery { step_index };
                warn!(%repair, "Repairing plan step");
                repairs.push(repair);
                question.to_string()
            }
        };

        steps.push(PlanStep { subquery, intent });
    }

    if steps.is_empty() {
        warn!("Planner returned an empty plan, using fallback step");
        repairs.push(PlanRepair::EmptyPlan);
        steps.push(PlanStep {
            subquery: question.to_string(),
            intent: default_intent.to_string(),
        });
    }

    (ExecutionPlan { steps }, repairs)
}
