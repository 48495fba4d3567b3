//! Exact-id retrieval tools for tickets and wiki pages

use crate::datasets::{wiki_page_keys, TICKETS, WIKI_PAGES};
use crate::error::{Error, Result};
use crate::registry::{Tool, ToolDefinition, ToolResult};
use std::time::Instant;

/// Full detail lookup for a single ticket by id.
///
/// Ids are uppercased before lookup so "shop-2847" resolves.
pub struct TicketDetailsTool {
    definition: ToolDefinition,
}

impl TicketDetailsTool {
    /// Create a new ticket details tool
    #[must_use]
    pub fn new() -> Self {
        let definition = ToolDefinition::new(
            "get_ticket",
            "Get full details for a specific ticket by id (e.g. 'SHOP-2847').",
        )
        .with_parameters(serde_json::json!({
            "type": "object",
            "properties": {
                "ticket_id": {
                    "type": "string",
                    "description": "Ticket id, e.g. 'SHOP-2847'"
                }
            },
            "required": ["ticket_id"]
        }));

        Self { definition }
    }
}

impl Default for TicketDetailsTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for TicketDetailsTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolResult> {
        let start = Instant::now();

        let ticket_id = input
            .get("ticket_id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::InvalidInput("Missing 'ticket_id' parameter".to_string()))?;

        let normalized = ticket_id.trim().to_uppercase();

        let summary = match TICKETS.get(normalized.as_str()) {
            Some(ticket) => format!(
                "Ticket {}: {}\nStatus: {}\nAssignee: {}\nPriority: {}\nCreated: {}\nUpdated: {}\n\nDescription:\n{}",
                normalized,
                ticket.title,
                ticket.status,
                ticket.assignee,
                ticket.priority,
                ticket.created,
                ticket.updated,
                ticket.description
            ),
            None => format!("Ticket {} not found", normalized),
        };

        Ok(ToolResult::success(
            serde_json::json!({"summary": summary}),
            start.elapsed().as_millis() as u64,
        ))
    }
}

/// Full content lookup for a single wiki page by key.
pub struct WikiPageTool {
    definition: ToolDefinition,
}

impl WikiPageTool {
    /// Create a new wiki page tool
    #[must_use]
    pub fn new() -> Self {
        let definition = ToolDefinition::new(
            "get_wiki_page",
            "Get the full content of a wiki page by key (e.g. 'checkout-rewrite').",
        )
        .with_parameters(serde_json::json!({
            "type": "object",
            "properties": {
                "page_key": {
                    "type": "string",
                    "description": "Wiki page key, e.g. 'checkout-rewrite'"
                }
            },
            "required": ["page_key"]
        }));

        Self { definition }
    }
}

impl Default for WikiPageTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for WikiPageTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolResult> {
        let start = Instant::now();

        let page_key = input
            .get("page_key")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::InvalidInput("Missing 'page_key' parameter".to_string()))?;

        let normalized = page_key.trim().to_lowercase();

        let summary = match WIKI_PAGES.get(normalized.as_str()) {
            Some(page) => format!(
                "{}\nLast updated: {}\n\nContent:\n{}",
                page.title, page.updated, page.content
            ),
            None => format!(
                "Page '{}' not found. Available keys: {}",
                normalized,
                wiki_page_keys().join(", ")
            ),
        };

        Ok(ToolResult::success(
            serde_json::json!({"summary": summary}),
            start.elapsed().as_millis() as u64,
        ))
    }
}
