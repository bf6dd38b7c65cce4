//! Embedder trait: text in, fixed-size vectors out.
//!
//! Implementations can wrap OpenAI or deterministic test embedders.

use async_trait::async_trait;

use crate::error::FlowError;

/// Produces fixed-size float vectors from text.
///
/// Used by [`VectorIndex`](super::VectorIndex) for document text on add and
/// query text on search. Returns one vector per input text, in input order.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embeds each text into a vector of dimension [`Embedder::dimension`].
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, FlowError>;

    /// Vector dimension returned by [`Embedder::embed`].
    fn dimension(&self) -> usize;
}
