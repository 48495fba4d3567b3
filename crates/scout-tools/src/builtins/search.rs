//! Keyword search tools over the ticket and wiki datasets

use crate::datasets::{TICKETS, WIKI_PAGES};
use crate::error::{Error, Result};
use crate::registry::{Tool, ToolDefinition, ToolResult};
use std::time::Instant;

fn extract_query(input: &serde_json::Value) -> Result<String> {
    let query = input
        .get("query")
        .and_then(|v| v.as_str())
        .ok_or_else(|| Error::InvalidInput("Missing 'query' parameter".to_string()))?;

    if query.trim().is_empty() {
        return Err(Error::InvalidInput("Query must not be empty".to_string()));
    }

    Ok(query.to_lowercase())
}

/// Keyword search over ticket tracker records.
///
/// Matches the query against title, description, priority, status, and
/// assignee. Zero matches is a normal outcome reported as a descriptive
/// string, never an error.
pub struct TicketSearchTool {
    definition: ToolDefinition,
}

impl TicketSearchTool {
    /// Create a new ticket search tool
    #[must_use]
    pub fn new() -> Self {
        let definition = ToolDefinition::new(
            "search_tickets",
            "Search tickets by keyword. Matches against title, description, \
             priority (e.g. 'P0'), status, and assignee name.",
        )
        .with_parameters(serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search keyword"
                }
            },
            "required": ["query"]
        }));

        Self { definition }
    }
}

impl Default for TicketSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for TicketSearchTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolResult> {
        let start = Instant::now();
        let query = extract_query(&input)?;

        let mut ids: Vec<_> = TICKETS.keys().copied().collect();
        ids.sort_unstable();

        let mut results = Vec::new();
        for id in ids {
            let ticket = &TICKETS[id];
            if ticket.title.to_lowercase().contains(&query)
                || ticket.description.to_lowercase().contains(&query)
                || ticket.priority.to_lowercase().contains(&query)
                || ticket.status.to_lowercase().contains(&query)
                || ticket.assignee.to_lowercase().contains(&query)
            {
                results.push(format!(
                    "{}: {} (Status: {}, Priority: {}, Assignee: {})",
                    id, ticket.title, ticket.status, ticket.priority, ticket.assignee
                ));
            }
        }

        let summary = if results.is_empty() {
            format!("No tickets found matching '{}'", query)
        } else {
            format!("Found {} ticket(s):\n{}", results.len(), results.join("\n"))
        };

        Ok(ToolResult::success(
            serde_json::json!({"summary": summary, "matches": results.len()}),
            start.elapsed().as_millis() as u64,
        ))
    }
}

/// Keyword search over wiki pages.
pub struct WikiSearchTool {
    definition: ToolDefinition,
}

impl WikiSearchTool {
    /// Create a new wiki search tool
    #[must_use]
    pub fn new() -> Self {
        let definition = ToolDefinition::new(
            "search_wiki",
            "Search wiki pages by keyword. Matches against page title and content.",
        )
        .with_parameters(serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search keyword"
                }
            },
            "required": ["query"]
        }));

        Self { definition }
    }
}

impl Default for WikiSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for WikiSearchTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolResult> {
        let start = Instant::now();
        let query = extract_query(&input)?;

        let mut keys: Vec<_> = WIKI_PAGES.keys().copied().collect();
        keys.sort_unstable();

        let mut results = Vec::new();
        for key in keys {
            let page = &WIKI_PAGES[key];
            if page.title.to_lowercase().contains(&query)
                || page.content.to_lowercase().contains(&query)
            {
                results.push(format!(
                    "- {} (Key: {}, Updated: {})",
                    page.title, key, page.updated
                ));
            }
        }

        let summary = if results.is_empty() {
            format!("No wiki pages found matching '{}'", query)
        } else {
            format!(
                "Found {} page(s):\n{}",
                results.len(),
                results.join("\n")
            )
        };

        Ok(ToolResult::success(
            serde_json::json!({"summary": summary, "matches": results.len()}),
            start.elapsed().as_millis() as u64,
        ))
    }
}
