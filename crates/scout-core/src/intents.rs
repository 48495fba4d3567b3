//! Standard intent wiring
//!
//! Builds the fixed search/retrieve/analyze registry over the builtin
//! lookup tools. The registry is constructed once at startup and injected
//! into the orchestrator; nothing mutates it afterwards.

use crate::handlers::{HandlerConfig, ReasoningHandler};
use crate::registry::IntentRegistry;
use scout_llm::ReasoningProvider;
use scout_tools::{metrics_tools, retrieval_tools, search_tools, RunnerConfig};
use std::sync::Arc;

/// The intent validation falls back to
pub const DEFAULT_INTENT: &str = "search";

const SEARCH_DESCRIPTION: &str = "Use when you need to FIND tickets or wiki pages using keywords \
    (e.g. \"find Safari issues\", \"search for checkout docs\")";

const RETRIEVE_DESCRIPTION: &str = "Use when you have specific ids and need DETAILS \
    (e.g. \"get ticket SHOP-2847\", \"get page checkout-rewrite\")";

const ANALYZE_DESCRIPTION: &str = "Use when you need to examine METRICS or TRENDS \
    (e.g. \"how are conversions trending?\", \"compare mobile and checkout metrics\")";

const SEARCH_PROMPT: &str = "You find relevant tickets and wiki pages. Use the search tools to \
    look up records matching the question, then summarize what was found. If nothing matches, \
    say so plainly.";

const RETRIEVE_PROMPT: &str = "You fetch full details for specific tickets or wiki pages. Use \
    the lookup tools with ids taken from the question or from previous step results, then \
    present the details clearly.";

const ANALYZE_PROMPT: &str = "You examine analytics metrics and trends. Use the metric tools to \
    look up or compare values, then explain what the numbers show.";

/// Build the standard intent registry over the given reasoning provider
///
/// Iteration caps differ per intent: retrieval is a single lookup, search
/// and analysis may need a couple of tool rounds.
#[must_use]
pub fn build_default_registry(
    provider: Arc<dyn ReasoningProvider>,
    runner_config: RunnerConfig,
) -> IntentRegistry {
    let mut registry = IntentRegistry::new(DEFAULT_INTENT);

    registry.register(Arc::new(ReasoningHandler::new(
        "search",
        SEARCH_DESCRIPTION,
        SEARCH_PROMPT,
        provider.clone(),
        search_tools(),
        runner_config.clone(),
        HandlerConfig::new().with_max_iterations(4),
    )));
    registry.register(Arc::new(ReasoningHandler::new(
        "retrieve",
        RETRIEVE_DESCRIPTION,
        RETRIEVE_PROMPT,
        provider.clone(),
        retrieval_tools(),
        runner_config.clone(),
        HandlerConfig::new().with_max_iterations(3),
    )));
    registry.register(Arc::new(ReasoningHandler::new(
        "analyze",
        ANALYZE_DESCRIPTION,
        ANALYZE_PROMPT,
        provider,
        metrics_tools(),
        runner_config,
        HandlerConfig::new().with_max_iterations(4),
    )));

    registry
}
