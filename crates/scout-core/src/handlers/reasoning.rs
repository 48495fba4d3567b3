//! Reasoning-backed capability handler
//!
//! Wraps a reasoning provider and a per-intent tool set in a bounded
//! tool-calling loop: ask the provider, execute whatever tools it requests,
//! feed the results back, and stop once it answers in plain text. The
//! iteration cap bounds worst-case latency; when it is hit the handler
//! makes one final no-tools request so the caller still gets a best-effort
//! answer instead of a hang.

use crate::error::Result;
use crate::handlers::IntentHandler;
use scout_llm::{
    CompletionRequest, Message, ReasoningProvider, ToolCompletionRequest, ToolDefinition,
};
use scout_tools::{RunnerConfig, ToolRegistry, ToolRunner};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Maximum characters of tool output fed back to the provider. Large tool
/// results blow the prompt budget; truncation keeps the loop bounded.
const MAX_TOOL_RESULT_CHARS: usize = 4000;

/// Configuration for a reasoning handler
#[derive(Debug, Clone)]
pub struct HandlerConfig {
    /// Maximum tool-calling iterations before the best-effort bailout
    pub max_iterations: usize,
    /// Model override (empty selects the provider default)
    pub model: Option<String>,
    /// Temperature for generation
    pub temperature: Option<f32>,
    /// Maximum tokens per response
    pub max_tokens: Option<u32>,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 4,
            model: None,
            temperature: Some(0.2),
            max_tokens: Some(1024),
        }
    }
}

impl HandlerConfig {
    /// Create a new configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the iteration cap
    #[must_use]
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Set the model override
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Capability handler backed by a reasoning provider and a tool set
pub struct ReasoningHandler {
    name: String,
    description: String,
    system_prompt: String,
    provider: Arc<dyn ReasoningProvider>,
    runner: ToolRunner,
    config: HandlerConfig,
}

impl ReasoningHandler {
    /// Create a new handler for one intent
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        system_prompt: impl Into<String>,
        provider: Arc<dyn ReasoningProvider>,
        tools: ToolRegistry,
        runner_config: RunnerConfig,
        config: HandlerConfig,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            system_prompt: system_prompt.into(),
            provider,
            runner: ToolRunner::new(Arc::new(tools), runner_config),
            config,
        }
    }

    fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.runner
            .registry()
            .list_definitions()
            .into_iter()
            .map(|d| ToolDefinition::new(&d.name, &d.description, d.parameters.clone()))
            .collect()
    }

    fn base_request(&self, messages: Vec<Message>) -> CompletionRequest {
        CompletionRequest {
            model: self.config.model.clone().unwrap_or_default(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }

    /// Execute one round of requested tool calls, appending the result
    /// messages to the conversation. Tool-level failures are fed back to the
    /// provider as error payloads so it can adjust, rather than aborting the
    /// step.
    async fn run_tool_calls(&self, calls: &[scout_llm::ToolCall], messages: &mut Vec<Message>) {
        for call in calls {
            let input: serde_json::Value =
                serde_json::from_str(&call.arguments).unwrap_or_else(|e| {
                    warn!(
                        tool = %call.name,
                        error = %e,
                        "Failed to parse tool arguments, using empty object"
                    );
                    serde_json::json!({})
                });

            let content = match self.runner.execute(&call.name, input).await {
                Ok(result) => serde_json::to_string(&result.output)
                    .unwrap_or_else(|_| "{}".to_string()),
                Err(e) => {
                    warn!(tool = %call.name, error = %e, "Tool execution failed");
                    serde_json::json!({"error": e.to_string()}).to_string()
                }
            };

            let content = if content.len() > MAX_TOOL_RESULT_CHARS {
                let truncated: String = content
                    .char_indices()
                    .take_while(|(i, _)| *i < MAX_TOOL_RESULT_CHARS)
                    .map(|(_, c)| c)
                    .collect();
                format!("{}...\n[truncated: {} total chars]", truncated, content.len())
            } else {
                content
            };

            messages.push(Message::tool_response(&call.id, &call.name, content));
        }
    }
}

#[async_trait::async_trait]
impl IntentHandler for ReasoningHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    #[instrument(skip(self, subquery, context), fields(intent = %self.name))]
    async fn answer(&self, subquery: &str, context: &str) -> Result<String> {
        let context_block = if context.trim().is_empty() {
            "No previous context".to_string()
        } else {
            format!("Results from previous steps:\n{}", context)
        };

        let mut messages = vec![
            Message::system(&self.system_prompt),
            Message::user(format!("{}\n\n{}", subquery, context_block)),
        ];

        let tool_definitions = self.tool_definitions();

        for iteration in 0..self.config.max_iterations {
            let request =
                ToolCompletionRequest::new(self.base_request(messages.clone()), tool_definitions.clone());
            let response = self.provider.complete_with_tools(request).await?;

            if response.tool_calls.is_empty() {
                let content = response.content.unwrap_or_default();
                if !content.trim().is_empty() {
                    debug!(iteration, "Handler answered");
                    return Ok(content);
                }
                // Empty answer without tool calls: fall through to bailout
                break;
            }

            debug!(
                iteration,
                tool_calls = response.tool_calls.len(),
                "Executing requested tools"
            );

            if let Some(content) = &response.content {
                if !content.trim().is_empty() {
                    messages.push(Message::assistant(content.clone()));
                }
            }

            self.run_tool_calls(&response.tool_calls, &mut messages).await;
        }

        warn!(
            intent = %self.name,
            max_iterations = self.config.max_iterations,
            "Iteration cap reached, requesting best-effort answer"
        );

        messages.push(Message::user(
            "Answer the question now using the information gathered so far.",
        ));
        let response = self.provider.complete(self.base_request(messages)).await?;
        Ok(response.content)
    }
}
