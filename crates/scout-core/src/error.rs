//! Error types for scout-core

use thiserror::Error;

/// Kernel error type
///
/// Malformed plans are never errors here — they are repaired by
/// [`crate::plan::validate_plan`]. `Invariant` marks defects in the kernel
/// itself (a validated intent missing from the registry, an empty result
/// log) and aborts the call.
#[derive(Debug, Error)]
pub enum Error {
    /// Planner call failed or timed out (plan-level abort)
    #[error("planning error: {0}")]
    Planning(String),

    /// Handler reported a failure it could not express as an answer
    #[error("handler error: {0}")]
    Handler(String),

    /// Internal invariant violation
    #[error("internal invariant violated: {0}")]
    Invariant(String),

    /// Reasoning backend error
    #[error("reasoning error: {0}")]
    Reasoning(#[from] scout_llm::Error),

    /// Lookup tool error
    #[error("tool error: {0}")]
    Tool(#[from] scout_tools::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
