//! Intent registry - the fixed mapping from intent name to handler
//!
//! Built once at startup and injected into the orchestrator; read-only for
//! the lifetime of the process, so it can be shared across concurrent
//! orchestration calls without locking.

use crate::handlers::IntentHandler;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Registry mapping intent names to capability handlers
///
/// One intent is designated the default; plan validation falls back to it
/// for unknown or missing intents, so it must be registered before the
/// registry is used.
pub struct IntentRegistry {
    handlers: HashMap<String, Arc<dyn IntentHandler>>,
    order: Vec<String>,
    default_intent: String,
}

impl IntentRegistry {
    /// Create an empty registry with the given default intent
    #[must_use]
    pub fn new(default_intent: impl Into<String>) -> Self {
        Self {
            handlers: HashMap::new(),
            order: Vec::new(),
            default_intent: default_intent.into(),
        }
    }

    /// Register a handler under its own name
    pub fn register(&mut self, handler: Arc<dyn IntentHandler>) {
        let name = handler.name().to_string();
        debug!(intent = %name, "Registering intent handler");
        if !self.handlers.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.handlers.insert(name, handler);
    }

    /// Resolve an intent name to its handler
    #[must_use]
    pub fn resolve(&self, intent: &str) -> Option<Arc<dyn IntentHandler>> {
        self.handlers.get(intent).cloned()
    }

    /// Check if an intent is registered
    #[must_use]
    pub fn has(&self, intent: &str) -> bool {
        self.handlers.contains_key(intent)
    }

    /// The designated default intent
    #[must_use]
    pub fn default_intent(&self) -> &str {
        &self.default_intent
    }

    /// Registered intent names, in registration order
    #[must_use]
    pub fn intent_names(&self) -> &[String] {
        &self.order
    }

    /// Number of registered intents
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no intents are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Human-readable enumeration of every intent, passed verbatim to the
    /// planner so it knows what it can route to.
    #[must_use]
    pub fn capability_descriptions(&self) -> String {
        let mut lines = vec!["Available intents:".to_string()];
        for name in &self.order {
            if let Some(handler) = self.handlers.get(name) {
                lines.push(format!("- {}: {}", name, handler.description()));
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NamedHandler {
        name: &'static str,
        description: &'static str,
    }

    #[async_trait::async_trait]
    impl IntentHandler for NamedHandler {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            self.description
        }

        async fn answer(&self, _subquery: &str, _context: &str) -> crate::error::Result<String> {
            Ok(String::new())
        }
    }

    fn sample_registry() -> IntentRegistry {
        let mut registry = IntentRegistry::new("search");
        registry.register(Arc::new(NamedHandler {
            name: "search",
            description: "find things by keyword",
        }));
        registry.register(Arc::new(NamedHandler {
            name: "analyze",
            description: "inspect metrics",
        }));
        registry
    }

    #[test]
    fn test_register_resolve_has() {
        let registry = sample_registry();

        assert_eq!(registry.len(), 2);
        assert!(registry.has("search"));
        assert!(registry.has("analyze"));
        assert!(!registry.has("retrieve"));
        assert!(registry.resolve("search").is_some());
        assert!(registry.resolve("retrieve").is_none());
        assert_eq!(registry.default_intent(), "search");
    }

    #[test]
    fn test_intent_names_keep_registration_order() {
        let registry = sample_registry();
        assert_eq!(registry.intent_names(), &["search", "analyze"]);
    }

    #[test]
    fn test_capability_descriptions() {
        let descriptions = sample_registry().capability_descriptions();

        let search_pos = descriptions.find("- search:").unwrap();
        let analyze_pos = descriptions.find("- analyze:").unwrap();
        assert!(descriptions.starts_with("Available intents:"));
        assert!(search_pos < analyze_pos);
        assert!(descriptions.contains("find things by keyword"));
    }

    #[test]
    fn test_reregistering_keeps_single_order_entry() {
        let mut registry = sample_registry();
        registry.register(Arc::new(NamedHandler {
            name: "search",
            description: "replacement",
        }));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.intent_names(), &["search", "analyze"]);
        assert!(registry.capability_descriptions().contains("replacement"));
    }
}
