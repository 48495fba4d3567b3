//! Capability handlers
//!
//! A handler turns one subquery plus the accumulated context into an answer
//! string for its intent. The orchestrator only sees this trait, so new
//! intents plug in without touching the execution loop.

mod reasoning;

pub use reasoning::{HandlerConfig, ReasoningHandler};

use crate::error::Result;

/// Trait for capability handlers
///
/// Handlers are pure with respect to kernel state: they read from their own
/// tools and return an answer; the orchestrator alone appends to the
/// context. "No data found" is an ordinary answer, not an error — `Err` is
/// reserved for infrastructure failures.
#[async_trait::async_trait]
pub trait IntentHandler: Send + Sync {
    /// Intent name this handler is registered under
    fn name(&self) -> &str;

    /// Human-readable description used in the planner's capability listing
    fn description(&self) -> &str;

    /// Answer a subquery given a read-only snapshot of prior step results
    async fn answer(&self, subquery: &str, context: &str) -> Result<String>;
}
