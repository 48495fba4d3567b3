//! Scout LLM - Reasoning backend abstraction
//!
//! This crate provides the external reasoning collaborator seam for Scout:
//! - Message and completion types for conversations
//! - Tool-calling types for function calling
//! - The `ReasoningProvider` trait and an OpenAI-compatible HTTP provider

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod completion;
pub mod error;
pub mod message;
pub mod openai;
pub mod provider;
pub mod tools;

pub use completion::{
    CompletionRequest, CompletionResponse, TokenUsage, ToolCompletionRequest,
    ToolCompletionResponse,
};
pub use error::{Error, Result};
pub use message::{Message, MessageRole};
pub use openai::{OpenAiCompatConfig, OpenAiCompatProvider};
pub use provider::ReasoningProvider;
pub use tools::{ToolCall, ToolChoice, ToolDefinition};
