//! Orchestrator scenario tests
//!
//! Planner and handlers are stubbed: the kernel's contract is the same
//! whether the collaborators reason or replay fixtures.

use crate::error::{Error, Result};
use crate::event_bus::{EventBus, OrchestratorEvent};
use crate::handlers::IntentHandler;
use crate::plan::RawPlanStep;
use crate::planner::QueryPlanner;
use crate::registry::IntentRegistry;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::{OrchestrationStatus, Orchestrator, OrchestratorConfig};

// ── Stub collaborators ───────────────────────────────────────────

struct StubPlanner {
    steps: Vec<RawPlanStep>,
}

#[async_trait::async_trait]
impl QueryPlanner for StubPlanner {
    async fn plan(
        &self,
        _question: &str,
        _capability_descriptions: &str,
    ) -> Result<Vec<RawPlanStep>> {
        Ok(self.steps.clone())
    }
}

struct FailingPlanner;

#[async_trait::async_trait]
impl QueryPlanner for FailingPlanner {
    async fn plan(
        &self,
        _question: &str,
        _capability_descriptions: &str,
    ) -> Result<Vec<RawPlanStep>> {
        Err(Error::Reasoning(scout_llm::Error::Network(
            "backend unreachable".to_string(),
        )))
    }
}

struct SleepyPlanner;

#[async_trait::async_trait]
impl QueryPlanner for SleepyPlanner {
    async fn plan(
        &self,
        _question: &str,
        _capability_descriptions: &str,
    ) -> Result<Vec<RawPlanStep>> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Vec::new())
    }
}

struct FixedHandler {
    name: &'static str,
    answer: String,
}

#[async_trait::async_trait]
impl IntentHandler for FixedHandler {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "stub"
    }

    async fn answer(&self, _subquery: &str, _context: &str) -> Result<String> {
        Ok(self.answer.clone())
    }
}

struct RecordingHandler {
    name: &'static str,
    answer: String,
    contexts: Arc<Mutex<Vec<String>>>,
}

#[async_trait::async_trait]
impl IntentHandler for RecordingHandler {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "stub"
    }

    async fn answer(&self, _subquery: &str, context: &str) -> Result<String> {
        self.contexts.lock().unwrap().push(context.to_string());
        Ok(self.answer.clone())
    }
}

struct FailingHandler {
    name: &'static str,
}

#[async_trait::async_trait]
impl IntentHandler for FailingHandler {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "stub"
    }

    async fn answer(&self, _subquery: &str, _context: &str) -> Result<String> {
        Err(Error::Handler("data source unreachable".to_string()))
    }
}

struct SleepyHandler {
    name: &'static str,
}

#[async_trait::async_trait]
impl IntentHandler for SleepyHandler {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "stub"
    }

    async fn answer(&self, _subquery: &str, _context: &str) -> Result<String> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok("too late".to_string())
    }
}

/// Cancels the shared token from inside its own step, then answers.
struct CancellingHandler {
    name: &'static str,
    token: CancellationToken,
}

#[async_trait::async_trait]
impl IntentHandler for CancellingHandler {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "stub"
    }

    async fn answer(&self, _subquery: &str, _context: &str) -> Result<String> {
        self.token.cancel();
        Ok("answered before cancel took effect".to_string())
    }
}

fn registry_of(handlers: Vec<Arc<dyn IntentHandler>>) -> Arc<IntentRegistry> {
    let mut registry = IntentRegistry::new("search");
    for handler in handlers {
        registry.register(handler);
    }
    Arc::new(registry)
}

fn orchestrator_with(
    raw_steps: Vec<RawPlanStep>,
    registry: Arc<IntentRegistry>,
) -> Orchestrator {
    Orchestrator::new(
        Arc::new(StubPlanner { steps: raw_steps }),
        registry,
        OrchestratorConfig::default(),
    )
}

// ── Scenarios ────────────────────────────────────────────────────

#[tokio::test]
async fn test_single_step_answer_is_verbatim() {
    let detail = "Ticket SHOP-2847: Safari checkout crashes on iOS 17";
    let registry = registry_of(vec![
        Arc::new(FixedHandler {
            name: "search",
            answer: "unused".to_string(),
        }),
        Arc::new(FixedHandler {
            name: "retrieve",
            answer: detail.to_string(),
        }),
    ]);
    let orchestrator = orchestrator_with(
        vec![RawPlanStep::new("Get details for ticket SHOP-2847", "retrieve")],
        registry,
    );

    let result = orchestrator
        .run("Get details for ticket SHOP-2847")
        .await
        .unwrap();

    assert_eq!(result.answer, detail);
    assert_eq!(result.plan.len(), 1);
    assert_eq!(result.status, OrchestrationStatus::Completed);
    assert!(!result.results[0].degraded);
}

#[tokio::test]
async fn test_two_step_labels_and_context_threading() {
    let contexts = Arc::new(Mutex::new(Vec::new()));
    let registry = registry_of(vec![
        Arc::new(RecordingHandler {
            name: "search",
            answer: "S1".to_string(),
            contexts: contexts.clone(),
        }),
        Arc::new(RecordingHandler {
            name: "retrieve",
            answer: "S2".to_string(),
            contexts: contexts.clone(),
        }),
    ]);
    let orchestrator = orchestrator_with(
        vec![
            RawPlanStep::new("find P0 tickets", "search"),
            RawPlanStep::new("get most critical", "retrieve"),
        ],
        registry,
    );

    let result = orchestrator.run("find and drill in").await.unwrap();

    assert_eq!(result.answer, "SEARCH: S1\n\nRETRIEVE: S2");
    assert_eq!(result.results.len(), 2);

    let contexts = contexts.lock().unwrap();
    assert_eq!(contexts[0], "");
    assert!(contexts[1].contains("S1"));
    assert!(contexts[1].contains("Step 0 (search)"));
}

#[tokio::test]
async fn test_empty_raw_plan_falls_back_to_default_intent() {
    let registry = registry_of(vec![Arc::new(FixedHandler {
        name: "search",
        answer: "fallback answer".to_string(),
    })]);
    let orchestrator = orchestrator_with(Vec::new(), registry);

    let result = orchestrator.run("what is going on?").await.unwrap();

    assert_eq!(result.plan.len(), 1);
    assert_eq!(result.plan.steps()[0].intent, "search");
    assert_eq!(result.plan.steps()[0].subquery, "what is going on?");
    assert_eq!(result.answer, "fallback answer");
}

#[tokio::test]
async fn test_unknown_intent_repaired_to_default() {
    let registry = registry_of(vec![Arc::new(FixedHandler {
        name: "search",
        answer: "repaired".to_string(),
    })]);
    let orchestrator = orchestrator_with(
        vec![RawPlanStep::new("summarize the situation", "summarize")],
        registry,
    );

    let result = orchestrator.run("summarize the situation").await.unwrap();

    assert_eq!(result.plan.steps()[0].intent, "search");
    assert_eq!(result.plan.steps()[0].subquery, "summarize the situation");
    assert_eq!(result.answer, "repaired");
}

#[tokio::test]
async fn test_context_threading_excludes_later_steps() {
    let contexts = Arc::new(Mutex::new(Vec::new()));
    let registry = registry_of(vec![
        Arc::new(RecordingHandler {
            name: "search",
            answer: "A1".to_string(),
            contexts: contexts.clone(),
        }),
        Arc::new(RecordingHandler {
            name: "retrieve",
            answer: "A2".to_string(),
            contexts: contexts.clone(),
        }),
        Arc::new(RecordingHandler {
            name: "analyze",
            answer: "A3".to_string(),
            contexts: contexts.clone(),
        }),
    ]);
    let orchestrator = orchestrator_with(
        vec![
            RawPlanStep::new("q0", "search"),
            RawPlanStep::new("q1", "retrieve"),
            RawPlanStep::new("q2", "analyze"),
        ],
        registry,
    );

    orchestrator.run("three parts").await.unwrap();

    let contexts = contexts.lock().unwrap();
    assert_eq!(contexts.len(), 3);

    // Step 0 sees nothing; step i sees exactly steps 0..i, in order.
    assert!(contexts[0].is_empty());
    assert!(contexts[1].contains("Step 0 (search): A1"));
    assert!(!contexts[1].contains("A2"));
    assert!(!contexts[1].contains("A3"));

    let first = contexts[2].find("Step 0 (search): A1").unwrap();
    let second = contexts[2].find("Step 1 (retrieve): A2").unwrap();
    assert!(first < second);
    assert!(!contexts[2].contains("A3"));
}

#[tokio::test]
async fn test_failed_step_degrades_and_execution_continues() {
    let registry = registry_of(vec![
        Arc::new(FailingHandler { name: "search" }),
        Arc::new(FixedHandler {
            name: "analyze",
            answer: "metrics look down".to_string(),
        }),
    ]);
    let orchestrator = orchestrator_with(
        vec![
            RawPlanStep::new("find issues", "search"),
            RawPlanStep::new("check metrics", "analyze"),
        ],
        registry,
    );

    let result = orchestrator.run("issues and metrics").await.unwrap();

    assert_eq!(result.status, OrchestrationStatus::PartialSuccess);
    assert_eq!(result.results.len(), 2);
    assert!(result.results[0].degraded);
    assert!(result.results[0]
        .answer
        .contains("Step could not be completed"));
    assert!(!result.results[1].degraded);
    assert!(result.answer.contains("ANALYZE: metrics look down"));
}

#[tokio::test]
async fn test_step_timeout_degrades_that_step_only() {
    let registry = registry_of(vec![
        Arc::new(SleepyHandler { name: "search" }),
        Arc::new(FixedHandler {
            name: "analyze",
            answer: "still got here".to_string(),
        }),
    ]);
    let orchestrator = Orchestrator::new(
        Arc::new(StubPlanner {
            steps: vec![
                RawPlanStep::new("slow step", "search"),
                RawPlanStep::new("fast step", "analyze"),
            ],
        }),
        registry,
        OrchestratorConfig::new().with_step_timeout(Duration::from_millis(50)),
    );

    let result = orchestrator.run("slow then fast").await.unwrap();

    assert_eq!(result.status, OrchestrationStatus::PartialSuccess);
    assert!(result.results[0].degraded);
    assert!(result.results[0].answer.contains("timed out"));
    assert_eq!(result.results[1].answer, "still got here");
}

#[tokio::test]
async fn test_planner_failure_aborts_call() {
    let registry = registry_of(vec![Arc::new(FixedHandler {
        name: "search",
        answer: "unused".to_string(),
    })]);
    let orchestrator = Orchestrator::new(
        Arc::new(FailingPlanner),
        registry,
        OrchestratorConfig::default(),
    );

    let err = orchestrator.run("anything").await.unwrap_err();
    assert!(matches!(err, Error::Planning(_)));
}

#[tokio::test]
async fn test_planner_timeout_aborts_call() {
    let registry = registry_of(vec![Arc::new(FixedHandler {
        name: "search",
        answer: "unused".to_string(),
    })]);
    let orchestrator = Orchestrator::new(
        Arc::new(SleepyPlanner),
        registry,
        OrchestratorConfig::new().with_planner_timeout(Duration::from_millis(50)),
    );

    let err = orchestrator.run("anything").await.unwrap_err();
    assert!(matches!(err, Error::Planning(_)));
}

#[tokio::test]
async fn test_missing_default_handler_is_fatal_invariant() {
    // Registry whose designated default was never registered: validation
    // emits a fallback step that cannot resolve.
    let registry = Arc::new(IntentRegistry::new("search"));
    let orchestrator = orchestrator_with(Vec::new(), registry);

    let err = orchestrator.run("anything").await.unwrap_err();
    assert!(matches!(err, Error::Invariant(_)));
}

#[tokio::test]
async fn test_cancellation_returns_partial_results() {
    let token = CancellationToken::new();
    let registry = registry_of(vec![
        Arc::new(CancellingHandler {
            name: "search",
            token: token.clone(),
        }),
        Arc::new(FixedHandler {
            name: "retrieve",
            answer: "never reached".to_string(),
        }),
    ]);
    let orchestrator = orchestrator_with(
        vec![
            RawPlanStep::new("step one", "search"),
            RawPlanStep::new("step two", "retrieve"),
        ],
        registry,
    );

    let result = orchestrator
        .run_with_cancellation("cancel mid-plan", token)
        .await
        .unwrap();

    assert_eq!(result.status, OrchestrationStatus::Cancelled);
    assert_eq!(result.results.len(), 1);
    assert_eq!(result.answer, "answered before cancel took effect");
}

#[tokio::test]
async fn test_cancellation_before_first_step() {
    let registry = registry_of(vec![Arc::new(FixedHandler {
        name: "search",
        answer: "unused".to_string(),
    })]);
    let orchestrator = orchestrator_with(
        vec![RawPlanStep::new("a step", "search")],
        registry,
    );

    let token = CancellationToken::new();
    token.cancel();

    let result = orchestrator
        .run_with_cancellation("cancelled up front", token)
        .await
        .unwrap();

    assert_eq!(result.status, OrchestrationStatus::Cancelled);
    assert!(result.results.is_empty());
    assert_eq!(result.answer, "");
}

// ── Events ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_repair_and_lifecycle_events_published() {
    let registry = registry_of(vec![Arc::new(FixedHandler {
        name: "search",
        answer: "done".to_string(),
    })]);
    let bus = Arc::new(EventBus::default());
    let mut receiver = bus.subscribe();

    let orchestrator = orchestrator_with(
        vec![RawPlanStep::new("odd request", "summarize")],
        registry,
    )
    .with_event_bus(bus);

    orchestrator.run("odd request").await.unwrap();

    let mut kinds = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        kinds.push(match event {
            OrchestratorEvent::ExecutionStarted { .. } => "started",
            OrchestratorEvent::PlanRepaired { .. } => "repaired",
            OrchestratorEvent::PlanReady { .. } => "ready",
            OrchestratorEvent::StepStarted { .. } => "step_started",
            OrchestratorEvent::StepCompleted { .. } => "step_completed",
            OrchestratorEvent::ExecutionCompleted { .. } => "completed",
            OrchestratorEvent::ExecutionCancelled { .. } => "cancelled",
            OrchestratorEvent::ExecutionFailed { .. } => "failed",
        });
    }

    assert_eq!(
        kinds,
        vec![
            "started",
            "repaired",
            "ready",
            "step_started",
            "step_completed",
            "completed"
        ]
    );
}

// ── Planner contract ─────────────────────────────────────────────

mockall::mock! {
    pub Planner {}

    #[async_trait::async_trait]
    impl QueryPlanner for Planner {
        async fn plan(
            &self,
            question: &str,
            capability_descriptions: &str,
        ) -> Result<Vec<RawPlanStep>>;
    }
}

#[tokio::test]
async fn test_planner_receives_capability_descriptions() {
    let mut planner = MockPlanner::new();
    planner
        .expect_plan()
        .withf(|question, descriptions| {
            question == "route me" && descriptions.contains("- search:")
        })
        .times(1)
        .returning(|_, _| Ok(vec![RawPlanStep::new("found", "search")]));

    let registry = registry_of(vec![Arc::new(FixedHandler {
        name: "search",
        answer: "ok".to_string(),
    })]);
    let orchestrator = Orchestrator::new(
        Arc::new(planner),
        registry,
        OrchestratorConfig::default(),
    );

    let result = orchestrator.run("route me").await.unwrap();
    assert_eq!(result.answer, "ok");
}
