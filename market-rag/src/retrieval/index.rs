//! Pre-built embedding index: load from JSON, rank by cosine similarity.
//!
//! File format: a JSON array of `{source?, page?, text, embedding}`. `page` may be
//! a number or a string.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::{DocumentChunk, DocumentStream, Embedder, RetrievalError, Retriever};

/// One stored passage with its embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub page: Option<Value>,
    pub text: String,
    pub embedding: Vec<f32>,
}

impl IndexEntry {
    fn to_chunk(&self) -> DocumentChunk {
        let page = match &self.page {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };
        DocumentChunk {
            source: self.source.clone(),
            page,
            text: self.text.clone(),
        }
    }
}

/// Cosine similarity of two vectors; 0.0 when either is all zeros.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

/// Top-k retriever over an in-memory embedding index.
pub struct VectorIndexRetriever {
    entries: Arc<Vec<IndexEntry>>,
    embedder: Arc<dyn Embedder>,
    top_k: usize,
}

impl VectorIndexRetriever {
    /// Builds a retriever over `entries`; all embeddings must share one dimension.
    pub fn new(
        entries: Vec<IndexEntry>,
        embedder: Arc<dyn Embedder>,
        top_k: usize,
    ) -> Result<Self, RetrievalError> {
        if let Some(first) = entries.first() {
            let dim = first.embedding.len();
            if let Some(bad) = entries.iter().position(|e| e.embedding.len() != dim) {
                return Err(RetrievalError::Index(format!(
                    "entry {} has dimension {}, expected {}",
                    bad,
                    entries[bad].embedding.len(),
                    dim
                )));
            }
        }
        Ok(Self {
            entries: Arc::new(entries),
            embedder,
            top_k,
        })
    }

    /// Loads an index file (JSON array of [`IndexEntry`]).
    pub fn load(
        path: impl AsRef<Path>,
        embedder: Arc<dyn Embedder>,
        top_k: usize,
    ) -> Result<Self, RetrievalError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let entries: Vec<IndexEntry> = serde_json::from_str(&raw)
            .map_err(|e| RetrievalError::Index(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), entries = entries.len(), "loaded retrieval index");
        Self::new(entries, embedder, top_k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl Retriever for VectorIndexRetriever {
    async fn fetch(&self, query: &str) -> Result<DocumentStream, RetrievalError> {
        if self.entries.is_empty() || self.top_k == 0 {
            return Ok(Box::new(std::iter::empty()));
        }
        let query_vec = self
            .embedder
            .embed(&[query])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| RetrievalError::Embedding("no embedding returned".into()))?;
        let expected = self.entries[0].embedding.len();
        if query_vec.len() != expected {
            return Err(RetrievalError::Embedding(format!(
                "query dimension {} does not match index dimension {}",
                query_vec.len(),
                expected
            )));
        }

        let mut scores: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (i, cosine_similarity(&query_vec, &e.embedding)))
            .collect();
        scores.sort_by(|a, b| b.1.total_cmp(&a.1));
        scores.truncate(self.top_k);
        debug!(hits = scores.len(), top_score = ?scores.first().map(|s| s.1), "ranked index entries");

        let entries = Arc::clone(&self.entries);
        Ok(Box::new(
            scores
                .into_iter()
                .map(move |(i, _)| Ok(entries[i].to_chunk())),
        ))
    }
}
