//! Orchestrator core structure

use crate::event_bus::{EventBus, OrchestratorEvent};
use crate::planner::QueryPlanner;
use crate::registry::IntentRegistry;
use std::sync::Arc;

use super::config::OrchestratorConfig;

/// Main orchestrator that routes a question through a validated plan
///
/// Holds only shared, read-only collaborators; per-call state lives on the
/// stack of [`Orchestrator::run`], so one instance serves concurrent calls.
pub struct Orchestrator {
    pub(crate) planner: Arc<dyn QueryPlanner>,
    pub(crate) registry: Arc<IntentRegistry>,
    pub(crate) event_bus: Option<Arc<EventBus>>,
    pub(crate) config: OrchestratorConfig,
}

impl Orchestrator {
    /// Create a new orchestrator
    #[must_use]
    pub fn new(
        planner: Arc<dyn QueryPlanner>,
        registry: Arc<IntentRegistry>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            planner,
            registry,
            event_bus: None,
            config,
        }
    }

    /// Set the event bus for execution events and repair warnings
    #[must_use]
    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.event_bus = Some(bus);
        self
    }

    /// Get a reference to the event bus (if set)
    #[must_use]
    pub fn event_bus(&self) -> Option<&Arc<EventBus>> {
        self.event_bus.as_ref()
    }

    /// Get the intent registry
    #[must_use]
    pub fn registry(&self) -> &Arc<IntentRegistry> {
        &self.registry
    }

    /// Publish an event to the event bus (no-op if no bus is set)
    pub(crate) fn emit(&self, event: OrchestratorEvent) {
        if let Some(bus) = &self.event_bus {
            bus.publish(event);
        }
    }
}
