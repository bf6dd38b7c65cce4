//! Template → model chains.
//!
//! A chain renders a [`PromptTemplate`] with caller variables, sends the
//! result as one user message (optionally preceded by a system prompt), and
//! returns the assistant text plus usage counters.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::FlowError;
use crate::llm::{ChatModel, TokenUsage};
use crate::message::Message;
use crate::prompt::PromptTemplate;

/// Output of one chain invocation.
#[derive(Debug, Clone)]
pub struct ChainOutput {
    /// Assistant reply text.
    pub text: String,
    /// Token usage for the underlying model call, when reported.
    pub usage: Option<TokenUsage>,
}

/// Prompt template bound to a chat model.
///
/// ```rust,no_run
/// use std::collections::HashMap;
/// use std::sync::Arc;
/// use trellis::{LlmChain, MockChat, PromptTemplate};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), trellis::FlowError> {
/// let chain = LlmChain::new(
///     Arc::new(MockChat::fixed("a graph of named steps")),
///     PromptTemplate::new("What is {thing}?"),
/// );
/// let vars = HashMap::from([("thing".to_string(), "a workflow".to_string())]);
/// let output = chain.invoke(&vars).await?;
/// println!("{}", output.text);
/// # Ok(())
/// # }
/// ```
pub struct LlmChain {
    model: Arc<dyn ChatModel>,
    template: PromptTemplate,
    system: Option<String>,
}

impl LlmChain {
    /// Binds a template to a model.
    pub fn new(model: Arc<dyn ChatModel>, template: PromptTemplate) -> Self {
        Self {
            model,
            template,
            system: None,
        }
    }

    /// Prepends a system message to every invocation.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Renders the template and makes one model call.
    pub async fn invoke(&self, vars: &HashMap<String, String>) -> Result<ChainOutput, FlowError> {
        let rendered = self.template.format(vars)?;

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system {
            messages.push(Message::system(system.clone()));
        }
        messages.push(Message::user(rendered));

        let completion = self.model.invoke(&messages).await?;
        Ok(ChainOutput {
            text: completion.content,
            usage: completion.usage,
        })
    }
}
