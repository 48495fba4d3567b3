//! The `ReasoningProvider` trait
//!
//! Scout treats planning and per-intent answering as calls to an external
//! reasoning collaborator with a text-in/text-out contract (plus function
//! calling). Any backend that implements this trait is interchangeable;
//! tests use deterministic scripted implementations.

use crate::completion::{
    CompletionRequest, CompletionResponse, ToolCompletionRequest, ToolCompletionResponse,
};
use crate::error::Result;

/// Trait for reasoning backends
#[async_trait::async_trait]
pub trait ReasoningProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Check if the provider supports function calling/tools
    fn supports_tools(&self) -> bool;

    /// Get the default model
    fn default_model(&self) -> &str;

    /// Complete a conversation (text only)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Complete a conversation with tools
    async fn complete_with_tools(
        &self,
        request: ToolCompletionRequest,
    ) -> Result<ToolCompletionResponse>;
}
