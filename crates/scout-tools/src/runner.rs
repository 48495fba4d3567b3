//! Runner - Tool execution engine
//!
//! Wraps every tool call in a timeout so a stuck lookup cannot hang the
//! step that requested it.

use crate::error::{Error, Result};
use crate::registry::{ToolRegistry, ToolResult};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

/// Configuration for the tool runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Timeout applied to each tool execution
    pub default_timeout: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            default_timeout: Duration::from_secs(10),
        }
    }
}

impl RunnerConfig {
    /// Create a new configuration with the given timeout
    #[must_use]
    pub fn new(default_timeout: Duration) -> Self {
        Self { default_timeout }
    }

    /// Set the default timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }
}

/// Tool execution engine
pub struct ToolRunner {
    registry: Arc<ToolRegistry>,
    config: RunnerConfig,
}

impl ToolRunner {
    /// Create a new runner over a registry
    #[must_use]
    pub fn new(registry: Arc<ToolRegistry>, config: RunnerConfig) -> Self {
        Self { registry, config }
    }

    /// Get the underlying registry
    #[must_use]
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Execute a tool by name
    #[instrument(skip(self, input), fields(tool = %name))]
    pub async fn execute(&self, name: &str, input: serde_json::Value) -> Result<ToolResult> {
        let tool = self
            .registry
            .get(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;

        tool.validate_input(&input)?;

        let start = Instant::now();
        debug!("Executing tool");

        match timeout(self.config.default_timeout, tool.execute(input)).await {
            Ok(result) => result,
            Err(_) => {
                let elapsed_ms = start.elapsed().as_millis() as u64;
                warn!(elapsed_ms, "Tool execution timed out");
                Err(Error::Timeout(elapsed_ms))
            }
        }
    }
}
