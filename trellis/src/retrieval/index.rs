//! In-memory vector index with cosine-similarity search.
//!
//! Embeds document text on add and query text on search. Not persistent;
//! all data is lost when the index is dropped.

use std::sync::Arc;

use dashmap::DashMap;

use crate::error::FlowError;

use super::embedder::Embedder;

/// One search result: document id, stored text, similarity score.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub id: String,
    pub text: String,
    /// Cosine similarity to the query, in [-1, 1].
    pub score: f32,
}

struct IndexEntry {
    text: String,
    vector: Vec<f32>,
}

/// In-memory vector index keyed by document id.
///
/// Adding a document embeds its text; [`search`](VectorIndex::search) embeds
/// the query and returns the top-k entries by cosine similarity, highest
/// first. Re-adding an id overwrites the previous entry.
pub struct VectorIndex {
    entries: DashMap<String, IndexEntry>,
    embedder: Arc<dyn Embedder>,
}

impl VectorIndex {
    /// Creates an empty index over the given embedder.
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            entries: DashMap::new(),
            embedder,
        }
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no documents are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Embeds and stores one document; an existing id is overwritten.
    pub async fn add(&self, id: impl Into<String>, text: impl Into<String>) -> Result<(), FlowError> {
        let text = text.into();
        let vectors = self.embedder.embed(&[&text]).await?;
        let vector = vectors
            .into_iter()
            .next()
            .ok_or_else(|| FlowError::ExternalCall("no vector returned".to_string()))?;
        self.entries.insert(id.into(), IndexEntry { text, vector });
        Ok(())
    }

    /// Embeds and stores chunks under `prefix-N` ids; returns the ids.
    ///
    /// All chunks are embedded in one batch call.
    pub async fn add_chunks(&self, prefix: &str, chunks: &[String]) -> Result<Vec<String>, FlowError> {
        if chunks.is_empty() {
            return Ok(Vec::new());
        }
        let texts: Vec<&str> = chunks.iter().map(String::as_str).collect();
        let vectors = self.embedder.embed(&texts).await?;
        if vectors.len() != chunks.len() {
            return Err(FlowError::ExternalCall(format!(
                "embedder returned {} vectors for {} chunks",
                vectors.len(),
                chunks.len()
            )));
        }

        let mut ids = Vec::with_capacity(chunks.len());
        for (i, (chunk, vector)) in chunks.iter().zip(vectors).enumerate() {
            let id = format!("{}-{}", prefix, i);
            self.entries.insert(
                id.clone(),
                IndexEntry {
                    text: chunk.clone(),
                    vector,
                },
            );
            ids.push(id);
        }
        Ok(ids)
    }

    /// Top-k most similar documents for the query, highest score first.
    pub async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchHit>, FlowError> {
        let vectors = self.embedder.embed(&[query]).await?;
        let query_vec = vectors
            .into_iter()
            .next()
            .ok_or_else(|| FlowError::ExternalCall("no vector returned".to_string()))?;

        let mut hits: Vec<SearchHit> = self
            .entries
            .iter()
            .map(|entry| SearchHit {
                id: entry.key().clone(),
                text: entry.value().text.clone(),
                score: cosine_similarity(&query_vec, &entry.value().vector),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(top_k);
        Ok(hits)
    }
}

/// Cosine similarity; 0.0 when either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Deterministic embedder folding bytes into a fixed-size vector.
    struct HashEmbedder {
        dimension: usize,
    }

    #[async_trait]
    impl Embedder for HashEmbedder {
        async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, FlowError> {
            Ok(texts
                .iter()
                .map(|t| {
                    let mut v = vec![0f32; self.dimension];
                    for (i, b) in t.bytes().enumerate() {
                        v[i % self.dimension] += b as f32 / 256.0;
                    }
                    v
                })
                .collect())
        }

        fn dimension(&self) -> usize {
            self.dimension
        }
    }

    fn index() -> VectorIndex {
        VectorIndex::new(Arc::new(HashEmbedder { dimension: 64 }))
    }

    /// **Scenario**: search ranks the matching document above the unrelated one.
    #[tokio::test]
    async fn search_finds_most_similar_document() {
        let index = index();
        index.add("greeting", "hello world").await.unwrap();
        index.add("rust", "rust programming").await.unwrap();

        let hits = index.search("rust programming", 2).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, "rust");
        assert!(hits[0].score >= hits[1].score);
    }

    /// **Scenario**: top_k caps the number of hits.
    #[tokio::test]
    async fn search_respects_top_k() {
        let index = index();
        for i in 0..5 {
            index.add(format!("doc-{}", i), format!("text {}", i)).await.unwrap();
        }
        let hits = index.search("text", 3).await.unwrap();
        assert_eq!(hits.len(), 3);
    }

    /// **Scenario**: re-adding an id overwrites the stored text.
    #[tokio::test]
    async fn add_overwrites_existing_id() {
        let index = index();
        index.add("doc", "old text").await.unwrap();
        index.add("doc", "new text").await.unwrap();
        assert_eq!(index.len(), 1);
        let hits = index.search("new text", 1).await.unwrap();
        assert_eq!(hits[0].text, "new text");
    }

    /// **Scenario**: add_chunks stores prefix-N ids in chunk order.
    #[tokio::test]
    async fn add_chunks_assigns_sequential_ids() {
        let index = index();
        let chunks = vec!["first chunk".to_string(), "second chunk".to_string()];
        let ids = index.add_chunks("doc", &chunks).await.unwrap();
        assert_eq!(ids, vec!["doc-0".to_string(), "doc-1".to_string()]);
        assert_eq!(index.len(), 2);
    }

    /// **Scenario**: add_chunks with no chunks is a no-op.
    #[tokio::test]
    async fn add_chunks_empty_is_noop() {
        let index = index();
        let ids = index.add_chunks("doc", &[]).await.unwrap();
        assert!(ids.is_empty());
        assert!(index.is_empty());
    }

    /// **Scenario**: cosine similarity is 0 against a zero vector and ~1 for identical vectors.
    #[test]
    fn cosine_similarity_edge_cases() {
        let zero = vec![0.0, 0.0, 0.0];
        let v = vec![1.0, 2.0, 3.0];
        assert_eq!(cosine_similarity(&zero, &v), 0.0);
        assert_eq!(cosine_similarity(&v, &zero), 0.0);
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }
}
