//! Orchestrator configuration

use std::time::Duration;

/// Configuration for the orchestrator
///
/// Both suspension points of a call — the planner call and each handler
/// call — get their own timeout. A handler timeout degrades that step; a
/// planner timeout aborts the call.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Timeout for the planner call
    pub planner_timeout: Duration,
    /// Timeout for each handler call
    pub step_timeout: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            planner_timeout: Duration::from_secs(60),
            step_timeout: Duration::from_secs(120),
        }
    }
}

impl OrchestratorConfig {
    /// Create a new configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the planner timeout
    #[must_use]
    pub fn with_planner_timeout(mut self, timeout: Duration) -> Self {
        self.planner_timeout = timeout;
        self
    }

    /// Set the per-step timeout
    #[must_use]
    pub fn with_step_timeout(mut self, timeout: Duration) -> Self {
        self.step_timeout = timeout;
        self
    }
}
