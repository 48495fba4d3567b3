//! Planner - question decomposition
//!
//! The planner is an external reasoning collaborator: the kernel hands it
//! the question plus the registry's capability descriptions and gets back a
//! raw list of (subquery, intent) pairs. No quality contract — anything it
//! returns goes through plan validation before execution.

use crate::error::Result;
use crate::plan::RawPlanStep;
use scout_llm::{CompletionRequest, Message, ReasoningProvider};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Trait for query planners
#[async_trait::async_trait]
pub trait QueryPlanner: Send + Sync {
    /// Decompose a question into an ordered raw plan
    ///
    /// `capability_descriptions` is the registry's enumeration of available
    /// intents, passed verbatim. The returned plan may be empty.
    async fn plan(
        &self,
        question: &str,
        capability_descriptions: &str,
    ) -> Result<Vec<RawPlanStep>>;
}

/// Default system prompt for the reasoning planner
pub const PLANNER_SYSTEM_PROMPT: &str = r#"You decompose a user question into an ordered execution plan.

Each step is an object with two keys:
- "subquery": a focused question for that step
- "intent": the capability that should handle it, chosen from the available intents listed in the user message

Later steps can rely on the results of earlier ones, so order the steps by dependency. Use one step for simple questions; split multi-part questions into one step per part.

Respond with a JSON array only, no prose. Example:
[{"subquery": "Find P0 tickets", "intent": "search"}, {"subquery": "Get details for the most critical one", "intent": "retrieve"}]"#;

/// Configuration for the reasoning planner
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// System prompt
    pub system_prompt: String,
    /// Model override (empty selects the provider default)
    pub model: Option<String>,
    /// Temperature for generation
    pub temperature: Option<f32>,
    /// Maximum tokens for the plan
    pub max_tokens: Option<u32>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            system_prompt: PLANNER_SYSTEM_PROMPT.to_string(),
            model: None,
            temperature: Some(0.0),
            max_tokens: Some(1024),
        }
    }
}

impl PlannerConfig {
    /// Create a new configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the system prompt
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
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

/// Planner backed by a reasoning provider
pub struct ReasoningPlanner {
    provider: Arc<dyn ReasoningProvider>,
    config: PlannerConfig,
}

impl ReasoningPlanner {
    /// Create a new planner
    #[must_use]
    pub fn new(provider: Arc<dyn ReasoningProvider>, config: PlannerConfig) -> Self {
        Self { provider, config }
    }

    /// Create with default configuration
    #[must_use]
    pub fn with_defaults(provider: Arc<dyn ReasoningProvider>) -> Self {
        Self::new(provider, PlannerConfig::default())
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }
}

#[async_trait::async_trait]
impl QueryPlanner for ReasoningPlanner {
    #[instrument(skip(self, question, capability_descriptions))]
    async fn plan(
        &self,
        question: &str,
        capability_descriptions: &str,
    ) -> Result<Vec<RawPlanStep>> {
        let request = CompletionRequest {
            model: self.config.model.clone().unwrap_or_default(),
            messages: vec![
                Message::system(&self.config.system_prompt),
                Message::user(format!(
                    "{}\n\nQuestion: {}",
                    capability_descriptions, question
                )),
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self.provider.complete(request).await?;
        let raw = parse_raw_plan(&response.content);
        debug!(steps = raw.len(), "Planner produced raw plan");
        Ok(raw)
    }
}

/// Parse a raw plan from planner output
///
/// Lenient by design: code fences and surrounding prose are ignored, and
/// anything that is not a JSON array of step objects degrades to an empty
/// plan so the validator's fallback path takes over.
pub(crate) fn parse_raw_plan(content: &str) -> Vec<RawPlanStep> {
    let start = content.find('[');
    let end = content.rfind(']');

    let Some((start, end)) = start.zip(end).filter(|(s, e)| s < e) else {
        warn!("Planner output contained no JSON array");
        return Vec::new();
    };

    match serde_json::from_str::<Vec<RawPlanStep>>(&content[start..=end]) {
        Ok(steps) => steps,
        Err(e) => {
            warn!(error = %e, "Failed to parse planner output, treating as empty plan");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_array() {
        let steps = parse_raw_plan(
            r#"[{"subquery": "Find P0 tickets", "intent": "search"},
                {"subquery": "Get the most critical", "intent": "retrieve"}]"#,
        );

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].subquery.as_deref(), Some("Find P0 tickets"));
        assert_eq!(steps[1].intent.as_deref(), Some("retrieve"));
    }

    #[test]
    fn test_parse_strips_code_fence_and_prose() {
        let content = "Here is the plan:\n```json\n[{\"subquery\": \"q\", \"intent\": \"analyze\"}]\n```";
        let steps = parse_raw_plan(content);

        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].intent.as_deref(), Some("analyze"));
    }

    #[test]
    fn test_parse_tolerates_missing_fields() {
        let steps = parse_raw_plan(r#"[{"intent": "search"}, {"subquery": "q"}]"#);

        assert_eq!(steps.len(), 2);
        assert!(steps[0].subquery.is_none());
        assert!(steps[1].intent.is_none());
    }

    #[test]
    fn test_parse_garbage_degrades_to_empty_plan() {
        assert!(parse_raw_plan("I could not produce a plan.").is_empty());
        assert!(parse_raw_plan("[not json").is_empty());
        assert!(parse_raw_plan("{\"subquery\": \"object not array\"}").is_empty());
    }

    #[test]
    fn test_planner_config_builder() {
        let config = PlannerConfig::new()
            .with_model("gpt-4o-mini")
            .with_temperature(0.1);

        assert_eq!(config.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(config.temperature, Some(0.1));
        assert!(config.system_prompt.contains("JSON array"));
    }
}
