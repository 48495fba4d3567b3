//! EventBus - broadcast-based event system for orchestration events
//!
//! Publishes events during execution so CLIs, service endpoints, and tests
//! can observe plan repairs and step progress without the kernel being
//! coupled to any particular output sink.

use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Events emitted during an orchestration call
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrchestratorEvent {
    /// Execution has started
    ExecutionStarted {
        /// Unique execution identifier
        execution_id: Uuid,
        /// The user question
        question: String,
    },
    /// The validator repaired part of the raw plan
    PlanRepaired {
        /// Execution identifier
        execution_id: Uuid,
        /// Human-readable description of the repair
        detail: String,
    },
    /// Plan validated and ready to execute
    PlanReady {
        /// Execution identifier
        execution_id: Uuid,
        /// Number of steps in the validated plan
        step_count: usize,
    },
    /// A plan step has started
    StepStarted {
        /// Execution identifier
        execution_id: Uuid,
        /// 0-based step index
        step_index: usize,
        /// Intent handling this step
        intent: String,
    },
    /// A plan step has completed
    StepCompleted {
        /// Execution identifier
        execution_id: Uuid,
        /// 0-based step index
        step_index: usize,
        /// Intent that handled this step
        intent: String,
        /// Whether the step failed and was recorded as degraded
        degraded: bool,
        /// Step duration in milliseconds
        duration_ms: u64,
    },
    /// Execution completed and an answer was synthesized
    ExecutionCompleted {
        /// Execution identifier
        execution_id: Uuid,
    },
    /// Execution was cancelled mid-plan
    ExecutionCancelled {
        /// Execution identifier
        execution_id: Uuid,
        /// Number of steps completed before cancellation
        completed_steps: usize,
    },
    /// Execution aborted with a fatal error
    ExecutionFailed {
        /// Execution identifier
        execution_id: Uuid,
        /// Error description
        error: String,
    },
}

impl OrchestratorEvent {
    /// Get the execution_id from any event variant
    #[must_use]
    pub fn execution_id(&self) -> Uuid {
        match self {
            Self::ExecutionStarted { execution_id, .. }
            | Self::PlanRepaired { execution_id, .. }
            | Self::PlanReady { execution_id, .. }
            | Self::StepStarted { execution_id, .. }
            | Self::StepCompleted { execution_id, .. }
            | Self::ExecutionCompleted { execution_id }
            | Self::ExecutionCancelled { execution_id, .. }
            | Self::ExecutionFailed { execution_id, .. } => *execution_id,
        }
    }
}

/// Broadcast-based event bus for orchestration events
///
/// Uses `tokio::broadcast` so multiple subscribers can receive the same
/// events. Slow subscribers miss events (lagged) rather than blocking the
/// publisher.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<OrchestratorEvent>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events. Returns a receiver that will get all future events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<OrchestratorEvent> {
        self.sender.subscribe()
    }

    /// Publish an event to all active subscribers.
    ///
    /// Returns the number of subscribers that received the event. With no
    /// subscribers the event is silently dropped.
    pub fn publish(&self, event: OrchestratorEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Get the current number of active subscribers
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
