//! OpenAI Chat Completions client implementing `ChatModel`.
//!
//! Talks to the real Chat Completions API. Requires `OPENAI_API_KEY` (or an
//! explicit config with key and base URL). Sampling is controlled with
//! `with_temperature` and `with_top_p`; usage counters reported by the API
//! are passed through on the returned `Completion`.

use async_trait::async_trait;
use tracing::{debug, trace};

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
    },
    Client,
};

use crate::error::FlowError;
use crate::message::Message;

use super::{ChatModel, Completion, TokenUsage};

/// OpenAI Chat Completions client.
///
/// Uses `OPENAI_API_KEY` from the environment by default, or provide config
/// via [`OpenAiChat::with_config`] (custom key, base URL, OpenAI-compatible
/// proxy). API failures map to [`FlowError::ExternalCall`].
pub struct OpenAiChat {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
    top_p: Option<f32>,
}

impl OpenAiChat {
    /// Build a client with default config (API key from `OPENAI_API_KEY`).
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            model: model.into(),
            temperature: None,
            top_p: None,
        }
    }

    /// Build a client with custom config (e.g. custom API key or base URL).
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(config),
            model: model.into(),
            temperature: None,
            top_p: None,
        }
    }

    /// Set temperature (0–2), the randomness control. Lower is more deterministic.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set top_p (0–1), the nucleus-sampling threshold: the model samples from
    /// the smallest token set whose cumulative probability exceeds it.
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Convert our `Message` list to OpenAI request messages.
    fn to_request_messages(messages: &[Message]) -> Vec<ChatCompletionRequestMessage> {
        messages
            .iter()
            .map(|m| match m {
                Message::System(s) => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(s.as_str()),
                ),
                Message::User(s) => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(s.as_str()),
                ),
                Message::Assistant(s) => {
                    ChatCompletionRequestMessage::Assistant((s.as_str()).into())
                }
            })
            .collect()
    }
}

#[async_trait]
impl ChatModel for OpenAiChat {
    async fn invoke(&self, messages: &[Message]) -> Result<Completion, FlowError> {
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(Self::to_request_messages(messages));
        if let Some(t) = self.temperature {
            args.temperature(t);
        }
        if let Some(p) = self.top_p {
            args.top_p(p);
        }
        let request = args
            .build()
            .map_err(|e| FlowError::ExternalCall(format!("request build failed: {}", e)))?;

        debug!(
            model = %self.model,
            message_count = messages.len(),
            temperature = ?self.temperature,
            top_p = ?self.top_p,
            "chat completion request"
        );
        if let Ok(js) = serde_json::to_string(&request) {
            trace!(request = %js, "chat completion request body");
        }

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| FlowError::ExternalCall(format!("OpenAI API error: {}", e)))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| FlowError::ExternalCall("OpenAI returned no choices".to_string()))?;

        let content = choice.message.content.unwrap_or_default();
        let usage = response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(Completion { content, usage })
    }
}
