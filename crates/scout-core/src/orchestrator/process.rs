//! Orchestrator execution loop
//!
//! Steps run strictly sequentially: each handler receives the accumulated
//! context of every prior step, so no step starts before the previous one
//! has been appended.

use crate::error::{Error, Result};
use crate::event_bus::OrchestratorEvent;
use crate::plan::validate_plan;
use std::time::Instant;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::core::Orchestrator;
use super::synthesize::{render_context_entry, synthesize};
use super::types::{OrchestrationResult, OrchestrationStatus, StepResult};

impl Orchestrator {
    /// Run one orchestration call
    pub async fn run(&self, question: &str) -> Result<OrchestrationResult> {
        self.run_with_cancellation(question, CancellationToken::new())
            .await
    }

    /// Run one orchestration call with caller-controlled cancellation
    ///
    /// On cancellation the loop stops advancing and the completed step
    /// results are returned with status [`OrchestrationStatus::Cancelled`]
    /// rather than being discarded.
    #[tracing::instrument(skip(self, question, cancel_token))]
    pub async fn run_with_cancellation(
        &self,
        question: &str,
        cancel_token: CancellationToken,
    ) -> Result<OrchestrationResult> {
        let execution_id = Uuid::new_v4();
        info!(execution_id = %execution_id, question = %question, "Starting orchestration");

        self.emit(OrchestratorEvent::ExecutionStarted {
            execution_id,
            question: question.to_string(),
        });

        // Plan. A planner failure or timeout is plan-level: there is nothing
        // to fall back on, so the call aborts.
        let capability_descriptions = self.registry.capability_descriptions();
        let raw_plan = match timeout(
            self.config.planner_timeout,
            self.planner.plan(question, &capability_descriptions),
        )
        .await
        {
            Ok(Ok(raw_plan)) => raw_plan,
            Ok(Err(e)) => {
                return Err(self.fail(execution_id, Error::Planning(e.to_string())));
            }
            Err(_) => {
                return Err(self.fail(
                    execution_id,
                    Error::Planning(format!(
                        "planner timed out after {}s",
                        self.config.planner_timeout.as_secs()
                    )),
                ));
            }
        };

        // Validate/repair. Repairs are warnings, never errors.
        let (plan, repairs) = validate_plan(&raw_plan, &self.registry, question);
        for repair in &repairs {
            self.emit(OrchestratorEvent::PlanRepaired {
                execution_id,
                detail: repair.to_string(),
            });
        }
        self.emit(OrchestratorEvent::PlanReady {
            execution_id,
            step_count: plan.len(),
        });
        debug!(execution_id = %execution_id, steps = plan.len(), "Plan ready");

        // Execute sequentially, threading context forward.
        let mut context = String::new();
        let mut results: Vec<StepResult> = Vec::with_capacity(plan.len());
        let mut cancelled = false;
        let mut any_degraded = false;

        for (step_index, step) in plan.steps().iter().enumerate() {
            if cancel_token.is_cancelled() {
                cancelled = true;
                break;
            }

            // Validation guarantees every intent resolves; a miss here is a
            // kernel defect, not a user-facing condition.
            let Some(handler) = self.registry.resolve(&step.intent) else {
                let err = Error::Invariant(format!(
                    "validated intent '{}' is not registered",
                    step.intent
                ));
                return Err(self.fail(execution_id, err));
            };

            self.emit(OrchestratorEvent::StepStarted {
                execution_id,
                step_index,
                intent: step.intent.clone(),
            });
            info!(
                execution_id = %execution_id,
                step_index,
                intent = %step.intent,
                subquery = %step.subquery,
                "Executing step"
            );

            // Biased so a step that finishes in the same instant as a
            // cancel is still recorded; cancellation must not discard
            // completed work.
            let start = Instant::now();
            let outcome = tokio::select! {
                biased;
                answered = timeout(
                    self.config.step_timeout,
                    handler.answer(&step.subquery, &context),
                ) => Some(answered),
                () = cancel_token.cancelled() => None,
            };

            let Some(answered) = outcome else {
                cancelled = true;
                break;
            };

            // Step-level failure policy: a failed or timed-out handler
            // degrades this step and execution continues, since later steps
            // may not depend on it.
            let (answer, degraded) = match answered {
                Ok(Ok(answer)) => (answer, false),
                Ok(Err(e)) => {
                    warn!(
                        execution_id = %execution_id,
                        step_index,
                        error = %e,
                        "Handler failed, recording degraded step"
                    );
                    (format!("Step could not be completed: {}", e), true)
                }
                Err(_) => {
                    warn!(
                        execution_id = %execution_id,
                        step_index,
                        "Handler timed out, recording degraded step"
                    );
                    (
                        format!(
                            "Step could not be completed: '{}' handler timed out after {}s",
                            step.intent,
                            self.config.step_timeout.as_secs()
                        ),
                        true,
                    )
                }
            };

            let duration_ms = start.elapsed().as_millis() as u64;
            any_degraded |= degraded;

            let result = StepResult {
                step_index,
                step: step.clone(),
                answer,
                degraded,
                duration_ms,
            };
            context.push_str(&render_context_entry(&result));

            self.emit(OrchestratorEvent::StepCompleted {
                execution_id,
                step_index,
                intent: step.intent.clone(),
                degraded,
                duration_ms,
            });
            results.push(result);
        }

        let status = if cancelled {
            OrchestrationStatus::Cancelled
        } else if any_degraded {
            OrchestrationStatus::PartialSuccess
        } else {
            OrchestrationStatus::Completed
        };

        // A validated plan is non-empty, so an empty result log can only
        // mean cancellation before the first step finished.
        let answer = if results.is_empty() {
            if cancelled {
                String::new()
            } else {
                return Err(self.fail(
                    execution_id,
                    Error::Invariant("execution produced no step results".to_string()),
                ));
            }
        } else {
            synthesize(&results)?
        };

        if cancelled {
            info!(
                execution_id = %execution_id,
                completed_steps = results.len(),
                "Orchestration cancelled, returning partial results"
            );
            self.emit(OrchestratorEvent::ExecutionCancelled {
                execution_id,
                completed_steps: results.len(),
            });
        } else {
            info!(
                execution_id = %execution_id,
                steps = results.len(),
                status = ?status,
                "Orchestration complete"
            );
            self.emit(OrchestratorEvent::ExecutionCompleted { execution_id });
        }

        Ok(OrchestrationResult {
            execution_id,
            answer,
            status,
            plan,
            results,
        })
    }

    /// Log, publish, and return a fatal error
    fn fail(&self, execution_id: Uuid, err: Error) -> Error {
        error!(execution_id = %execution_id, error = %err, "Orchestration failed");
        self.emit(OrchestratorEvent::ExecutionFailed {
            execution_id,
            error: err.to_string(),
        });
        err
    }
}
