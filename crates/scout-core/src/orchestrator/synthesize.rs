//! Final-answer synthesis and context rendering

use crate::error::{Error, Result};

use super::types::StepResult;

/// Render the context entry appended after a step completes.
///
/// The label carries the step index and intent so later handlers (and
/// anyone reading a transcript) can trace which step produced what.
pub(crate) fn render_context_entry(result: &StepResult) -> String {
    format!(
        "\nStep {} ({}): {}\n",
        result.step_index, result.step.intent, result.answer
    )
}

/// Synthesize the final answer from the ordered result log
///
/// A single result is returned verbatim — no added labeling. Two or more
/// results are each rendered as `"INTENT: answer"` and joined with a blank
/// line, preserving plan order; contributions are never reordered, merged,
/// or deduplicated. An empty log is unreachable for a validated plan and is
/// treated as an invariant violation.
pub fn synthesize(results: &[StepResult]) -> Result<String> {
    match results {
        [] => Err(Error::Invariant(
            "synthesis requires at least one step result".to_string(),
        )),
        [single] => Ok(single.answer.clone()),
        many => Ok(many
            .iter()
            .map(|r| format!("{}: {}", r.step.intent.to_uppercase(), r.answer))
            .collect::<Vec<_>>()
            .join("\n\n")),
    }
}
