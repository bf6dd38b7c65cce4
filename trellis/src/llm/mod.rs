//! Language-model boundary: messages in, completion out.
//!
//! Chains, the QA pipeline, and workflow nodes depend on a callable that
//! turns a message list into assistant text; this module defines the trait,
//! an OpenAI-compatible client, and a scripted mock.

mod mock;
mod openai;

pub use mock::MockChat;
pub use openai::OpenAiChat;

use async_trait::async_trait;

use crate::error::FlowError;
use crate::message::Message;

/// Token usage for one model call (prompt + completion).
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt (input).
    pub prompt_tokens: u32,
    /// Tokens in the completion (output).
    pub completion_tokens: u32,
    /// Total tokens (prompt + completion).
    pub total_tokens: u32,
}

/// Response from one chat completion.
#[derive(Debug, Clone)]
pub struct Completion {
    /// Assistant message content (plain text).
    pub content: String,
    /// Token usage for this call, when the API reports it.
    pub usage: Option<TokenUsage>,
}

/// Chat model: given messages, returns assistant text and usage counters.
///
/// One synchronous-looking call per turn; failures of any kind surface as
/// [`FlowError::ExternalCall`] and are propagated without retry.
/// Implementations: [`MockChat`] (fixed or scripted replies) and
/// [`OpenAiChat`] (real API).
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// One completion turn: read the messages, return the assistant reply.
    async fn invoke(&self, messages: &[Message]) -> Result<Completion, FlowError>;
}
