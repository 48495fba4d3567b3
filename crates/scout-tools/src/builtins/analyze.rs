//! Metric inspection tools over the analytics dataset

use crate::datasets::{metric_names, MetricRecord, METRICS};
use crate::error::{Error, Result};
use crate::registry::{Tool, ToolDefinition, ToolResult};
use std::time::Instant;

fn format_metric(name: &str, metric: &MetricRecord) -> String {
    format!(
        "{}:\nCurrent: {}\nPrevious: {}\nTrend: {} ({:+.1}%)\nPeriod: {}",
        name, metric.current, metric.previous, metric.trend, metric.change_pct, metric.period
    )
}

/// Current value and trend lookup for a single metric.
pub struct MetricLookupTool {
    definition: ToolDefinition,
}

impl MetricLookupTool {
    /// Create a new metric lookup tool
    #[must_use]
    pub fn new() -> Self {
        let definition = ToolDefinition::new(
            "get_metric",
            "Get the current value, previous value, and trend for a metric \
             (e.g. 'mobile_conversions').",
        )
        .with_parameters(serde_json::json!({
            "type": "object",
            "properties": {
                "metric_name": {
                    "type": "string",
                    "description": "Metric name, e.g. 'mobile_conversions'"
                }
            },
            "required": ["metric_name"]
        }));

        Self { definition }
    }
}

impl Default for MetricLookupTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for MetricLookupTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolResult> {
        let start = Instant::now();

        let metric_name = input
            .get("metric_name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::InvalidInput("Missing 'metric_name' parameter".to_string()))?;

        let normalized = metric_name.trim().to_lowercase();

        let summary = match METRICS.get(normalized.as_str()) {
            Some(metric) => format_metric(&normalized, metric),
            None => format!(
                "Metric '{}' not found. Available: {}",
                normalized,
                metric_names().join(", ")
            ),
        };

        Ok(ToolResult::success(
            serde_json::json!({"summary": summary}),
            start.elapsed().as_millis() as u64,
        ))
    }
}

/// Side-by-side comparison of two metrics.
pub struct MetricCompareTool {
    definition: ToolDefinition,
}

impl MetricCompareTool {
    /// Create a new metric comparison tool
    #[must_use]
    pub fn new() -> Self {
        let definition = ToolDefinition::new(
            "compare_metrics",
            "Compare two metrics side by side, showing current values and trends.",
        )
        .with_parameters(serde_json::json!({
            "type": "object",
            "properties": {
                "metric_a": {
                    "type": "string",
                    "description": "First metric name"
                },
                "metric_b": {
                    "type": "string",
                    "description": "Second metric name"
                }
            },
            "required": ["metric_a", "metric_b"]
        }));

        Self { definition }
    }
}

impl Default for MetricCompareTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for MetricCompareTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolResult> {
        let start = Instant::now();

        let metric_a = input
            .get("metric_a")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::InvalidInput("Missing 'metric_a' parameter".to_string()))?
            .trim()
            .to_lowercase();
        let metric_b = input
            .get("metric_b")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::InvalidInput("Missing 'metric_b' parameter".to_string()))?
            .trim()
            .to_lowercase();

        let summary = match (
            METRICS.get(metric_a.as_str()),
            METRICS.get(metric_b.as_str()),
        ) {
            (Some(a), Some(b)) => format!(
                "Comparison:\n{}: {} ({} {:+.1}%)\n{}: {} ({} {:+.1}%)",
                metric_a, a.current, a.trend, a.change_pct, metric_b, b.current, b.trend,
                b.change_pct
            ),
            _ => format!("One or both metrics not found: {}, {}", metric_a, metric_b),
        };

        Ok(ToolResult::success(
            serde_json::json!({"summary": summary}),
            start.elapsed().as_millis() as u64,
        ))
    }
}

/// Listing of every available metric with its trend.
pub struct MetricListTool {
    definition: ToolDefinition,
}

impl MetricListTool {
    /// Create a new metric listing tool
    #[must_use]
    pub fn new() -> Self {
        let definition = ToolDefinition::new(
            "list_metrics",
            "List all available metrics with their current values and trends.",
        );

        Self { definition }
    }
}

impl Default for MetricListTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for MetricListTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, _input: serde_json::Value) -> Result<ToolResult> {
        let start = Instant::now();

        let lines: Vec<String> = metric_names()
            .iter()
            .map(|name| {
                let metric = &METRICS[*name];
                format!(
                    "- {}: {} ({} {:+.1}%)",
                    name, metric.current, metric.trend, metric.change_pct
                )
            })
            .collect();

        let summary = format!("Available metrics:\n{}", lines.join("\n"));

        Ok(ToolResult::success(
            serde_json::json!({"summary": summary}),
            start.elapsed().as_millis() as u64,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_metric() {
        let tool = MetricLookupTool::new();
        let result = tool
            .execute(serde_json::json!({"metric_name": "mobile_conversions"}))
            .await
            .unwrap();

        let summary = result.output["summary"].as_str().unwrap();
        assert!(summary.contains("Current: 3.2"));
        assert!(summary.contains("down (-8.6%)"));
        assert!(summary.contains("week-over-week"));
    }

    #[tokio::test]
    async fn test_get_metric_unknown_lists_available() {
        let tool = MetricLookupTool::new();
        let result = tool
            .execute(serde_json::json!({"metric_name": "revenue"}))
            .await
            .unwrap();

        assert!(result.success);
        let summary = result.output["summary"].as_str().unwrap();
        assert!(summary.contains("Metric 'revenue' not found"));
        assert!(summary.contains("mobile_conversions"));
    }

    #[tokio::test]
    async fn test_compare_metrics() {
        let tool = MetricCompareTool::new();
        let result = tool
            .execute(serde_json::json!({
                "metric_a": "mobile_conversions",
                "metric_b": "checkout_completion"
            }))
            .await
            .unwrap();

        let summary = result.output["summary"].as_str().unwrap();
        assert!(summary.starts_with("Comparison:"));
        assert!(summary.contains("mobile_conversions: 3.2"));
        assert!(summary.contains("checkout_completion: 78.5"));
    }

    #[tokio::test]
    async fn test_compare_metrics_partial_miss() {
        let tool = MetricCompareTool::new();
        let result = tool
            .execute(serde_json::json!({
                "metric_a": "mobile_conversions",
                "metric_b": "revenue"
            }))
            .await
            .unwrap();

        let summary = result.output["summary"].as_str().unwrap();
        assert!(summary.contains("One or both metrics not found"));
    }

    #[tokio::test]
    async fn test_list_metrics() {
        let tool = MetricListTool::new();
        let result = tool.execute(serde_json::json!({})).await.unwrap();

        let summary = result.output["summary"].as_str().unwrap();
        assert!(summary.starts_with("Available metrics:"));
        assert!(summary.contains("- safari_users: 24.3"));
        assert!(summary.contains("- payment_success_rate: 96.2"));
    }
}
