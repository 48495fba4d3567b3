//! Built-in lookup tools, grouped by the intent that owns them
//!
//! Each intent gets a disjoint tool set: search tools find records by
//! keyword, retrieval tools fetch records by exact id, metric tools inspect
//! the analytics store.

mod analyze;
mod retrieve;
mod search;

pub use analyze::{MetricCompareTool, MetricListTool, MetricLookupTool};
pub use retrieve::{TicketDetailsTool, WikiPageTool};
pub use search::{TicketSearchTool, WikiSearchTool};

use crate::registry::ToolRegistry;
use std::sync::Arc;

/// Registry holding the keyword-search tools
#[must_use]
pub fn search_tools() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(TicketSearchTool::new()));
    registry.register(Arc::new(WikiSearchTool::new()));
    registry
}

/// Registry holding the exact-id retrieval tools
#[must_use]
pub fn retrieval_tools() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(TicketDetailsTool::new()));
    registry.register(Arc::new(WikiPageTool::new()));
    registry
}

/// Registry holding the metric inspection tools
#[must_use]
pub fn metrics_tools() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(MetricLookupTool::new()));
    registry.register(Arc::new(MetricCompareTool::new()));
    registry.register(Arc::new(MetricListTool::new()));
    registry
}
