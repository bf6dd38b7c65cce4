//! OpenAI Embeddings implementation of [`Embedder`].
//!
//! Supports models like `text-embedding-3-small`, `text-embedding-3-large`,
//! and `text-embedding-ada-002`. Requires `OPENAI_API_KEY` (or custom
//! config).

use async_openai::{
    config::OpenAIConfig,
    types::embeddings::{CreateEmbeddingRequest, EmbeddingInput},
    Client,
};

use crate::error::FlowError;

/// OpenAI Embeddings client.
///
/// Default model `text-embedding-3-small` embeds into 1536 dimensions. API
/// failures map to [`FlowError::ExternalCall`].
pub struct OpenAiEmbedder {
    config: OpenAIConfig,
    model: String,
    dimensions: usize,
}

impl OpenAiEmbedder {
    /// Creates an embedder for the given model; API key from `OPENAI_API_KEY`.
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_config(OpenAIConfig::new(), model)
    }

    /// Creates an embedder with custom configuration (API key, base URL,
    /// OpenAI-compatible provider).
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        let model = model.into();
        let dimensions = Self::model_dimensions(&model);
        Self {
            config,
            model,
            dimensions,
        }
    }

    /// Vector dimension per model; unknown models assume 1536.
    fn model_dimensions(model: &str) -> usize {
        match model {
            "text-embedding-3-large" => 3072,
            "text-embedding-3-small" | "text-embedding-ada-002" => 1536,
            _ => 1536,
        }
    }

    /// Embeds a single text.
    pub async fn embed_one(&self, text: &str) -> Result<Vec<f32>, FlowError> {
        let mut vectors = self.embed_inputs(EmbeddingInput::String(text.to_string())).await?;
        if vectors.is_empty() {
            return Err(FlowError::ExternalCall("no embedding returned".to_string()));
        }
        Ok(vectors.swap_remove(0))
    }

    async fn embed_inputs(&self, input: EmbeddingInput) -> Result<Vec<Vec<f32>>, FlowError> {
        let request = CreateEmbeddingRequest {
            input,
            model: self.model.clone(),
            ..Default::default()
        };

        let client = Client::with_config(self.config.clone());
        let response = client
            .embeddings()
            .create(request)
            .await
            .map_err(|e| FlowError::ExternalCall(format!("OpenAI API error: {}", e)))?;

        Ok(response.data.into_iter().map(|e| e.embedding).collect())
    }
}

#[async_trait::async_trait]
impl super::Embedder for OpenAiEmbedder {
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, FlowError> {
        let inputs: Vec<String> = texts.iter().map(|&s| s.to_string()).collect();
        let input = if inputs.len() == 1 {
            EmbeddingInput::String(inputs.into_iter().next().unwrap_or_default())
        } else {
            EmbeddingInput::StringArray(inputs)
        };
        self.embed_inputs(input).await
    }

    fn dimension(&self) -> usize {
        self.dimensions
    }
}
