//! Retrieval-augmented QA: top-k chunks stuffed into a prompt, one model call.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::FlowError;
use crate::llm::{ChatModel, TokenUsage};
use crate::message::Message;
use crate::prompt::PromptTemplate;

use super::index::VectorIndex;

/// Answer from the QA pipeline.
#[derive(Debug)]
pub struct Answer {
    /// Assistant reply text.
    pub text: String,
    /// Ids of the chunks given to the model as context, most similar first.
    pub sources: Vec<String>,
    /// Token usage for the model call, when reported.
    pub usage: Option<TokenUsage>,
}

/// Retrieval-augmented QA over a [`VectorIndex`].
///
/// [`ask`](RetrievalQa::ask) embeds the question, pulls the `top_k` most
/// similar chunks, renders them into the answer template (placeholders
/// `{context}` and `{question}`), and makes one model call.
pub struct RetrievalQa {
    index: Arc<VectorIndex>,
    model: Arc<dyn ChatModel>,
    template: PromptTemplate,
    system: Option<String>,
    top_k: usize,
}

impl RetrievalQa {
    /// Builds the pipeline; `top_k` defaults to 4.
    pub fn new(index: Arc<VectorIndex>, model: Arc<dyn ChatModel>, template: PromptTemplate) -> Self {
        Self {
            index,
            model,
            template,
            system: None,
            top_k: 4,
        }
    }

    /// Prepends a system message to the model call.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Number of chunks retrieved per question.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Answers one question from the indexed chunks.
    pub async fn ask(&self, question: &str) -> Result<Answer, FlowError> {
        let hits = self.index.search(question, self.top_k).await?;
        let context = hits
            .iter()
            .map(|h| h.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let vars = HashMap::from([
            ("context".to_string(), context),
            ("question".to_string(), question.to_string()),
        ]);
        let rendered = self.template.format(&vars)?;

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system {
            messages.push(Message::system(system.clone()));
        }
        messages.push(Message::user(rendered));

        let completion = self.model.invoke(&messages).await?;
        Ok(Answer {
            text: completion.content,
            sources: hits.into_iter().map(|h| h.id).collect(),
            usage: completion.usage,
        })
    }
}
